/// レップカウンター
///
/// 加算経路は on_valid_edge のみ（分類器の立ち上がりエッジ1回につき1加算）。
/// リセット以外で減ることはない。
#[derive(Debug, Default)]
pub struct RepCounter {
    count: u32,
}

impl RepCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 分類器が新しい有効スクワットを検出したときに呼ばれる
    pub fn on_valid_edge(&mut self) {
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(RepCounter::new().count(), 0);
    }

    #[test]
    fn test_increments_by_one() {
        let mut counter = RepCounter::new();
        counter.on_valid_edge();
        assert_eq!(counter.count(), 1);
        counter.on_valid_edge();
        counter.on_valid_edge();
        assert_eq!(counter.count(), 3);
    }

    #[test]
    fn test_reset_idempotent() {
        let mut counter = RepCounter::new();
        counter.on_valid_edge();
        counter.reset();
        assert_eq!(counter.count(), 0);
        counter.reset();
        assert_eq!(counter.count(), 0);
    }
}
