use crate::analysis::history::BoundedHistory;
use crate::config::HandleConfig;
use crate::marker::{BodyMarker, MarkerFrame};

/// ハンドル（ウェイト）高さトラッカー
///
/// マーカー4の上辺ピクセル長と既知の物理辺長（5.7cm）からピクセル/cm比を出し、
/// 基準点のY座標をcmに換算する。有効なサンプルだけを履歴に積む。
pub struct HandleTracker {
    marker_width_cm: f32,
    history: BoundedHistory<f32>,
}

impl HandleTracker {
    pub fn new(marker_width_cm: f32, history_capacity: usize) -> Self {
        Self {
            marker_width_cm,
            history: BoundedHistory::new(history_capacity),
        }
    }

    pub fn from_config(config: &HandleConfig, history_capacity: usize) -> Self {
        Self::new(config.marker_width_cm, history_capacity)
    }

    /// 現フレームからハンドル高さ（cm）を計算し、取れた場合のみ履歴に追加する
    pub fn update(&mut self, frame: &MarkerFrame) -> Option<f32> {
        let marker = frame.get(BodyMarker::Handle)?;

        // 退化した検出（幅0）ではピクセル/cm比がゼロになり割れない
        let width_pixels = marker.edge_width();
        if width_pixels == 0.0 {
            return None;
        }

        let pixels_per_cm = width_pixels / self.marker_width_cm;
        let height_cm = marker.reference().y / pixels_per_cm;

        self.history.push(height_cm);
        Some(height_cm)
    }

    pub fn history(&self) -> &BoundedHistory<f32> {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{square_marker, Marker, MarkerFrame};
    use nalgebra::Point2;

    fn tracker() -> HandleTracker {
        HandleTracker::new(5.7, 100)
    }

    #[test]
    fn test_height_at_origin_is_zero() {
        // 上辺10px = 5.7cm、基準点y=0 → 高さ0cm
        let frame = MarkerFrame::from_detections(vec![square_marker(4, 0.0, 0.0, 10.0)]);
        let mut t = tracker();
        let height = t.update(&frame).unwrap();
        assert!(height.abs() < 1e-6, "expected 0, got {}", height);
    }

    #[test]
    fn test_height_scales_with_pixel_ratio() {
        // 57px = 5.7cm → 10px/cm、y=570px → 57cm
        let frame = MarkerFrame::from_detections(vec![square_marker(4, 0.0, 570.0, 57.0)]);
        let mut t = tracker();
        let height = t.update(&frame).unwrap();
        assert!((height - 57.0).abs() < 1e-3, "expected 57, got {}", height);
    }

    #[test]
    fn test_missing_marker() {
        let frame = MarkerFrame::from_detections(vec![square_marker(1, 0.0, 0.0, 10.0)]);
        let mut t = tracker();
        assert!(t.update(&frame).is_none());
        assert!(t.history().is_empty());
    }

    #[test]
    fn test_degenerate_zero_width() {
        // 4隅が同一点に潰れた検出 → ゼロ除算せずNone
        let p = Point2::new(5.0, 5.0);
        let frame = MarkerFrame::from_detections(vec![Marker::new(4, [p, p, p, p])]);
        let mut t = tracker();
        assert!(t.update(&frame).is_none());
        assert!(t.history().is_empty());
    }

    #[test]
    fn test_history_records_only_valid_samples() {
        let mut t = tracker();
        let present = MarkerFrame::from_detections(vec![square_marker(4, 0.0, 10.0, 10.0)]);
        let absent = MarkerFrame::empty();

        t.update(&present);
        t.update(&absent);
        t.update(&present);

        // 欠測ティックは履歴に入らない
        assert_eq!(t.history().len(), 2);
    }
}
