//! System prompt assembly.

use crate::collector::ContextOutcome;

/// Context text used when the table-store cannot be read.
pub const FALLBACK_CONTEXT: &str = "Data saat ini tidak tersedia.";

/// Features the assistant describes when asked what the app can do.
pub const PRODUCT_FEATURES: [&str; 4] = ["Sensus", "Surat", "Keuangan", "Bank Sampah"];

/// Pick the text to embed for a collection outcome.
pub fn context_text(outcome: &ContextOutcome) -> &str {
    match outcome {
        ContextOutcome::Ready(text) => text,
        ContextOutcome::Unavailable(_) => FALLBACK_CONTEXT,
    }
}

/// Build the system instruction around a context block.
pub fn build_system_prompt(context: &str, language: &str) -> String {
    let features = match PRODUCT_FEATURES.split_last() {
        Some((last, rest)) => format!("{}, dan {}", rest.join(", "), last),
        None => String::new(),
    };
    format!(
        "Anda adalah asisten virtual 'Manajemen Warga'.\n\
         Gunakan data berikut untuk menjawab pertanyaan warga jika relevan:\n\
         {context}\n\
         \n\
         Tugas Anda:\n\
         - Jika warga bertanya tentang saldo atau jumlah warga, gunakan data di atas.\n\
         - Jika bertanya tentang fitur, jelaskan fitur {features}.\n\
         - Selalu gunakan {language} yang sopan dan ramah."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_context_and_rules() {
        let prompt = build_system_prompt("- Saldo Kas RT saat ini: Rp 70,000", "bahasa Indonesia");
        assert!(prompt.starts_with("Anda adalah asisten virtual 'Manajemen Warga'."));
        assert!(prompt.contains("Rp 70,000"));
        assert!(prompt.contains("fitur Sensus, Surat, Keuangan, dan Bank Sampah."));
        assert!(prompt.ends_with("Selalu gunakan bahasa Indonesia yang sopan dan ramah."));
    }

    #[test]
    fn test_prompt_uses_configured_language() {
        let prompt = build_system_prompt("ctx", "bahasa Jawa");
        assert!(prompt.contains("Selalu gunakan bahasa Jawa"));
    }

    #[test]
    fn test_context_text_falls_back() {
        let ready = ContextOutcome::Ready("42 orang".to_string());
        assert_eq!(context_text(&ready), "42 orang");

        let down = ContextOutcome::Unavailable("timeout".to_string());
        assert_eq!(context_text(&down), FALLBACK_CONTEXT);
    }
}
