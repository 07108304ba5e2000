//! Best score
//!
//! A single integer persisted to LocalStorage as a decimal string.

use crate::platform;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "comicBonkHighScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Parse a stored value; anything unreadable counts as no record
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let best = trimmed
            .parse::<u64>()
            .ok()
            .or_else(|| trimmed.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0).map(|v| v as u64))
            .unwrap_or(0);
        Self { best }
    }

    /// Record a finished round. Returns true on a new record.
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.best && score > 0 {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load the best score from storage
    pub fn load() -> Self {
        match platform::load_item(Self::STORAGE_KEY) {
            Some(raw) => {
                let stored = Self::parse(&raw);
                log::info!("Loaded high score {}", stored.best);
                stored
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if platform::save_item(Self::STORAGE_KEY, &self.best.to_string()) {
            log::info!("High score saved ({})", self.best);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_only_beats_record() {
        let mut hs = HighScore::new(100);
        assert!(!hs.submit(50));
        assert!(!hs.submit(100));
        assert!(hs.submit(101));
        assert_eq!(hs.best(), 101);
    }

    #[test]
    fn test_zero_never_records() {
        let mut hs = HighScore::default();
        assert!(!hs.submit(0));
        assert_eq!(hs.best(), 0);
        assert!(hs.submit(15));
    }

    #[test]
    fn test_parse_stored_values() {
        assert_eq!(HighScore::parse("1234").best(), 1234);
        assert_eq!(HighScore::parse(" 42\n").best(), 42);
        assert_eq!(HighScore::parse("315.0").best(), 315);
        assert_eq!(HighScore::parse("garbage").best(), 0);
        assert_eq!(HighScore::parse("-5").best(), 0);
        assert_eq!(HighScore::parse("").best(), 0);
    }
}
