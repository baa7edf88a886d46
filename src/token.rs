use rand::Rng;

/// 128-bit random identifier of an opaque [`Origin`](crate::Origin).
///
/// The all-zero value is reserved and never produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnguessableToken {
    high: u64,
    low: u64,
}

impl UnguessableToken {
    /// Mint a fresh token from the thread-local CSPRNG
    pub fn create() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let token = Self {
                high: rng.r#gen(),
                low: rng.r#gen(),
            };
            if !token.is_zero() {
                return token;
            }
        }
    }

    /// Rebuild a token received from elsewhere. `None` for the reserved zero token.
    pub fn from_parts(high: u64, low: u64) -> Option<Self> {
        let token = Self { high, low };
        (!token.is_zero()).then_some(token)
    }

    pub fn high(self) -> u64 {
        self.high
    }

    pub fn low(self) -> u64 {
        self.low
    }

    fn is_zero(self) -> bool {
        self.high == 0 && self.low == 0
    }
}

impl core::fmt::Display for UnguessableToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:016X}{:016X}", self.high, self.low)
    }
}
