//! Filesystem script provider.

use std::path::PathBuf;

use duelforge_engine::{EngineError, ScriptProvider};
use tracing::debug;

/// Serves Lua sources from a script directory.
///
/// The engine asks for card scripts by bare name (`c<passcode>.lua`),
/// but standard script distributions keep those under an `official/`
/// subdirectory of the script root; requests matching that shape get
/// remapped. Everything else (`constant.lua`, `utility.lua`, ...)
/// resolves against the root directly.
pub struct DirectoryScriptProvider {
    root: PathBuf,
}

impl DirectoryScriptProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, name: &str) -> PathBuf {
        if is_card_script(name) {
            self.root.join("official").join(name)
        } else {
            self.root.join(name)
        }
    }
}

/// `c` followed by one or more digits, then `.lua`.
fn is_card_script(name: &str) -> bool {
    let Some(digits) = name
        .strip_prefix('c')
        .and_then(|rest| rest.strip_suffix(".lua"))
    else {
        return false;
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl ScriptProvider for DirectoryScriptProvider {
    fn read_script(&self, name: &str) -> Result<Vec<u8>, EngineError> {
        let path = self.resolve(name);
        std::fs::read(&path).map_err(|err| {
            debug!(script = name, path = %path.display(), error = %err, "script read failed");
            EngineError::ScriptNotFound(name.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_scripts_route_into_official() {
        let provider = DirectoryScriptProvider::new("/scripts");
        assert_eq!(
            provider.resolve("c12345678.lua"),
            PathBuf::from("/scripts/official/c12345678.lua")
        );
    }

    #[test]
    fn shared_scripts_stay_at_the_root() {
        let provider = DirectoryScriptProvider::new("/scripts");
        assert_eq!(
            provider.resolve("constant.lua"),
            PathBuf::from("/scripts/constant.lua")
        );
        assert_eq!(
            provider.resolve("utility.lua"),
            PathBuf::from("/scripts/utility.lua")
        );
    }

    #[test]
    fn card_script_shape_is_strict() {
        assert!(is_card_script("c1.lua"));
        assert!(is_card_script("c12345678.lua"));
        assert!(!is_card_script("c.lua"));
        assert!(!is_card_script("constant.lua"));
        assert!(!is_card_script("c12x45.lua"));
        assert!(!is_card_script("c12345678.luac"));
    }

    #[test]
    fn missing_scripts_are_an_error() {
        let provider = DirectoryScriptProvider::new("/nonexistent-script-root");
        assert!(matches!(
            provider.read_script("utility.lua"),
            Err(EngineError::ScriptNotFound(name)) if name == "utility.lua"
        ));
    }
}
