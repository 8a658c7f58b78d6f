//! Publication rules for space listings.

use rust_decimal::Decimal;

use crate::types::Money;

/// Why a listing cannot transition into the published state.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PublishError {
    #[error("A price greater than zero is required to publish.")]
    MissingPrice,

    #[error("A capacity of at least one is required to publish.")]
    MissingCapacity,

    #[error("At least one photo is required to publish.")]
    MissingImages,
}

/// Gate for the published state: price > 0, capacity >= 1 and a non-empty
/// gallery. Only transitions *into* published are validated; drafts and
/// paused listings may be arbitrarily incomplete.
pub fn publish_requirements(
    price: Option<Money>,
    capacity: Option<i32>,
    image_count: usize,
) -> Result<(), PublishError> {
    match price {
        Some(p) if p > Decimal::ZERO => {}
        _ => return Err(PublishError::MissingPrice),
    }
    match capacity {
        Some(c) if c >= 1 => {}
        _ => return Err(PublishError::MissingCapacity),
    }
    if image_count == 0 {
        return Err(PublishError::MissingImages);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn dec(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn missing_or_zero_price_blocks_publication() {
        assert_matches!(
            publish_requirements(None, Some(10), 1),
            Err(PublishError::MissingPrice)
        );
        assert_matches!(
            publish_requirements(Some(dec("0")), Some(10), 1),
            Err(PublishError::MissingPrice)
        );
    }

    #[test]
    fn missing_or_zero_capacity_blocks_publication() {
        assert_matches!(
            publish_requirements(Some(dec("100")), None, 1),
            Err(PublishError::MissingCapacity)
        );
        assert_matches!(
            publish_requirements(Some(dec("100")), Some(0), 1),
            Err(PublishError::MissingCapacity)
        );
    }

    #[test]
    fn empty_gallery_blocks_publication() {
        assert_matches!(
            publish_requirements(Some(dec("100")), Some(10), 0),
            Err(PublishError::MissingImages)
        );
    }

    #[test]
    fn complete_listing_publishes() {
        assert!(publish_requirements(Some(dec("100")), Some(10), 3).is_ok());
    }
}
