use crate::commands::{CmdMessage, CmdResult};
use crate::config::{reset_api_key, save_api_key, Credential, API_KEY_VAR};
use crate::error::{NotemasterError, Result};
use std::path::Path;

pub fn set(dotfile: &Path, key: &str) -> Result<CmdResult> {
    let key = key.trim();
    let message = match save_api_key(dotfile, key) {
        Ok(credential) => CmdMessage::success(format!(
            "API key {} saved to {}.",
            credential.masked(),
            dotfile.display()
        )),
        Err(NotemasterError::InvalidCredential { expected, actual }) => CmdMessage::error(format!(
            "The API key must be exactly {} characters long, got {}.",
            expected, actual
        )),
        Err(e) => return Err(e),
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn reset(dotfile: &Path) -> Result<CmdResult> {
    let message = if reset_api_key(dotfile)? {
        CmdMessage::success(format!("Removed {}.", dotfile.display()))
    } else {
        CmdMessage::info(format!("No {} to remove.", dotfile.display()))
    };
    Ok(CmdResult::default().with_message(message))
}

/// Reports the credential already resolved at startup. The dotfile is not
/// re-read here.
pub fn status(credential: Option<&Credential>) -> CmdResult {
    let message = match credential {
        Some(credential) => {
            CmdMessage::info(format!("API key configured: {}", credential.masked()))
        }
        None => CmdMessage::warning(format!(
            "No API key. Set {} or run `notemaster key set <KEY>`.",
            API_KEY_VAR
        )),
    };
    CmdResult::default().with_message(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::config::{read_dotfile, API_KEY_LEN, DOTFILE_NAME};
    use tempfile::TempDir;

    #[test]
    fn set_rejects_wrong_length_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let dotfile = dir.path().join(DOTFILE_NAME);

        let result = set(&dotfile, "short").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(result.messages[0].content.contains("73"));
        assert!(!dotfile.exists());
    }

    #[test]
    fn set_then_reset() {
        let dir = TempDir::new().unwrap();
        let dotfile = dir.path().join(DOTFILE_NAME);
        let key = "x".repeat(API_KEY_LEN);

        let result = set(&dotfile, &key).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert!(!result.messages[0].content.contains(&key));
        assert_eq!(read_dotfile(&dotfile).unwrap()[API_KEY_VAR], key);

        assert_eq!(reset(&dotfile).unwrap().messages[0].level, MessageLevel::Success);
        assert!(!dotfile.exists());
        assert_eq!(reset(&dotfile).unwrap().messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn status_masks_the_key() {
        let credential = Credential::new("abcd".to_string() + &"x".repeat(65) + "wxyz");
        let result = status(Some(&credential));
        assert!(result.messages[0].content.contains("abcd…wxyz"));
        assert_eq!(status(None).messages[0].level, MessageLevel::Warning);
    }
}
