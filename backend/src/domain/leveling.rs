//! Leveling engine: EXP thresholds and level-up arithmetic.
//!
//! The threshold to leave level `L` is `floor(100 * L^1.5)`. It is computed
//! exactly as `isqrt(10_000 * L^3)` so results never drift with floating
//! point rounding.

use serde::{Deserialize, Serialize};

/// Hunter level, always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Level(u32);

/// Raised when a level below one is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("level must be at least 1, got {0}")]
pub struct InvalidLevel(pub u32);

impl Level {
    /// Level assigned to freshly created hunters.
    pub const FIRST: Self = Self(1);

    /// Validate and wrap a raw level.
    pub fn new(value: u32) -> Result<Self, InvalidLevel> {
        if value == 0 {
            return Err(InvalidLevel(value));
        }
        Ok(Self(value))
    }

    /// Raw level number.
    pub fn get(self) -> u32 {
        self.0
    }

    /// EXP needed to advance from this level to the next.
    ///
    /// # Examples
    /// ```
    /// use hunter_backend::domain::Level;
    ///
    /// assert_eq!(Level::FIRST.required_exp(), 100);
    /// assert_eq!(Level::new(2).unwrap().required_exp(), 282);
    /// ```
    pub fn required_exp(self) -> u64 {
        let level = u128::from(self.0);
        let scaled = 10_000 * level * level * level;
        // Bounded by isqrt(10^4 * u32::MAX^3), which is below u64::MAX.
        u64::try_from(scaled.isqrt()).unwrap_or(u64::MAX)
    }

    /// The following level, or `None` when the counter is exhausted.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u32> for Level {
    type Error = InvalidLevel;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u32 {
    fn from(value: Level) -> Self {
        value.0
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A hunter's position on the leveling curve.
///
/// ## Invariants
/// - `exp < level.required_exp()` for every value produced by [`Progression::gain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    level: Level,
    exp: u64,
}

/// Result of applying an EXP gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// Level and EXP after carrying every overflow.
    pub progression: Progression,
    /// Number of thresholds crossed by this gain; zero when none.
    pub levels_gained: u32,
}

impl LevelUp {
    /// Whether at least one level was crossed.
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

impl Progression {
    /// Level one with no EXP.
    pub fn starting() -> Self {
        Self {
            level: Level::FIRST,
            exp: 0,
        }
    }

    /// Rebuild a progression from stored values.
    ///
    /// Stored rows may carry more EXP than the current threshold if they were
    /// written by another client; such rows are accepted as-is and normalised
    /// on the next gain.
    pub fn from_parts(level: Level, exp: u64) -> Self {
        Self { level, exp }
    }

    /// Current level, starting at one.
    pub fn level(&self) -> Level {
        self.level
    }

    /// EXP carried within the current level.
    pub fn exp(&self) -> u64 {
        self.exp
    }

    /// EXP threshold for the current level.
    pub fn exp_to_next(&self) -> u64 {
        self.level.required_exp()
    }

    /// Percentage of the current level completed, capped at 100.
    pub fn progress_pct(&self) -> u8 {
        let required = u128::from(self.exp_to_next().max(1));
        let pct = (u128::from(self.exp) * 100 / required).min(100);
        u8::try_from(pct).unwrap_or(100)
    }

    /// Add `delta` EXP and carry over into as many levels as it covers.
    ///
    /// # Examples
    /// ```
    /// use hunter_backend::domain::Progression;
    ///
    /// let outcome = Progression::starting().gain(180);
    /// assert_eq!(outcome.progression.level().get(), 2);
    /// assert_eq!(outcome.progression.exp(), 80);
    /// assert!(outcome.leveled_up());
    /// ```
    pub fn gain(self, delta: u64) -> LevelUp {
        let mut level = self.level;
        let mut exp = self.exp.saturating_add(delta);
        let mut levels_gained = 0_u32;

        loop {
            let required = level.required_exp();
            if exp < required {
                break;
            }
            let Some(next) = level.next() else {
                break;
            };
            exp -= required;
            level = next;
            levels_gained = levels_gained.saturating_add(1);
        }

        LevelUp {
            progression: Self { level, exp },
            levels_gained,
        }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::starting()
    }
}
