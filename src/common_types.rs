use rvstruct::ValueStruct;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, ValueStruct, Serialize, Deserialize)]
pub struct DeviceModelId(String);

#[derive(Debug, Clone, PartialEq, Eq, ValueStruct)]
pub struct RecognizedText(String);

impl RecognizedText {
    pub fn is_blank(&self) -> bool {
        self.value().trim().is_empty()
    }
}

#[derive(Debug, Clone, ValueStruct)]
pub struct AllowedCharacters(String);

impl AllowedCharacters {
    pub const DEFAULT: &'static str =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_. /";

    pub fn contains(&self, c: char) -> bool {
        self.value().contains(c)
    }

    /// Keeps only the recognised characters that belong to this set.
    pub fn retain_allowed<I>(&self, chars: I) -> String
    where
        I: IntoIterator<Item = char>,
    {
        chars.into_iter().filter(|c| self.contains(*c)).collect()
    }
}

impl Default for AllowedCharacters {
    fn default() -> Self {
        AllowedCharacters(Self::DEFAULT.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectDelay(pub std::time::Duration);

impl RedirectDelay {
    pub const DEFAULT: RedirectDelay = RedirectDelay(std::time::Duration::from_secs(2));
}

impl std::str::FromStr for RedirectDelay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let seconds = s
            .parse::<f64>()
            .map_err(|e| format!("Failed to parse redirect delay in seconds: {}", e))?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(format!(
                "Redirect delay should be a non-negative number of seconds: {}",
                s
            ));
        }
        std::time::Duration::try_from_secs_f64(seconds)
            .map(RedirectDelay)
            .map_err(|e| format!("Redirect delay is out of range: {}: {}", s, e))
    }
}
