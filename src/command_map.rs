use std::collections::HashMap;

use tracing::warn;

use crate::FLAG_PREFIX;

/// Flags from the command line mapped to the values that followed them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandMap {
    entries: HashMap<String, Vec<String>>,
}

impl CommandMap {
    /// Builds the map from the raw arguments, program name excluded.
    ///
    /// A flag owns every following token up to the next flag, an empty
    /// token, or the end of input. Tokens that do not follow a flag are
    /// ignored, and a repeated flag replaces its earlier values.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let mut entries = HashMap::new();
        let mut i = 0;

        while i < args.len() {
            let token = args[i].as_ref();
            i += 1;
            if !is_flag(token) {
                continue;
            }

            let mut values = Vec::new();
            while i < args.len() {
                let next = args[i].as_ref();
                if is_flag(next) || next.is_empty() {
                    break;
                }
                values.push(next.to_string());
                i += 1;
            }

            if entries.insert(token.to_string(), values).is_some() {
                warn!(flag = token, "flag given more than once, keeping the last values");
            }
        }

        Self { entries }
    }

    pub fn get(&self, flag: &str) -> Option<&[String]> {
        self.entries.get(flag).map(Vec::as_slice)
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.entries.contains_key(flag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_flag(token: &str) -> bool {
    token.starts_with(FLAG_PREFIX)
}
