use crate::errors::AggregatorError;

/// Maximum number of articles returned by one aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Limit {
    /// `-1` on the wire
    #[default]
    Unbounded,
    AtMost(usize),
}

impl Limit {
    pub fn apply<T>(&self, items: &mut Vec<T>) {
        if let Limit::AtMost(n) = self {
            items.truncate(*n);
        }
    }
}

impl TryFrom<i64> for Limit {
    type Error = AggregatorError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Limit::Unbounded),
            n if n >= 0 => usize::try_from(n)
                .map(Limit::AtMost)
                .map_err(|_| AggregatorError::InvalidLimit(n.to_string())),
            n => Err(AggregatorError::InvalidLimit(n.to_string())),
        }
    }
}

impl std::str::FromStr for Limit {
    type Err = AggregatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| AggregatorError::InvalidLimit(s.to_string()))?;
        Limit::try_from(value)
    }
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Limit::Unbounded => write!(f, "-1"),
            Limit::AtMost(n) => write!(f, "{}", n),
        }
    }
}
