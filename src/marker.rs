use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 計測に必要な4つのArUcoマーカーID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BodyMarker {
    Hip = 1,
    Knee = 2,
    Ankle = 3,
    Handle = 4,
}

impl BodyMarker {
    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Hip),
            2 => Some(Self::Knee),
            3 => Some(Self::Ankle),
            4 => Some(Self::Handle),
            _ => None,
        }
    }
}

/// 検出された単一マーカー
///
/// corners は検出器が返す4隅（左上から時計回り）のピクセル座標。
/// 角度計算は corners[0] を基準点として使用する（剛体マウントなら重心より安価で十分安定）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: u32,
    pub corners: [Point2<f32>; 4],
}

impl Marker {
    pub fn new(id: u32, corners: [Point2<f32>; 4]) -> Self {
        Self { id, corners }
    }

    /// 基準点（左上の角）
    pub fn reference(&self) -> Point2<f32> {
        self.corners[0]
    }

    /// 上辺の長さ（ピクセル）: corners[0] → corners[1]
    pub fn edge_width(&self) -> f32 {
        (self.corners[1] - self.corners[0]).norm()
    }
}

/// 1ティック分の検出結果（マーカーID → マーカー）
///
/// フレームごとに作り直す。マーカーの同一性はIDでのみ引き継がれる。
/// 必要なマーカーが欠けているのは正常な状態であり、エラーではない。
#[derive(Debug, Clone, Default)]
pub struct MarkerFrame {
    markers: HashMap<u32, Marker>,
}

impl MarkerFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    /// 検出器の出力から構築する。
    /// 不正な入力で同一IDが重複した場合は最初の出現を採用する（決定的）。
    pub fn from_detections<I>(detections: I) -> Self
    where
        I: IntoIterator<Item = Marker>,
    {
        let mut markers = HashMap::new();
        for marker in detections {
            markers.entry(marker.id).or_insert(marker);
        }
        Self { markers }
    }

    pub fn get(&self, which: BodyMarker) -> Option<&Marker> {
        self.markers.get(&which.id())
    }

    pub fn get_raw(&self, id: u32) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// hip→knee のような区間ベクトル（両マーカーが存在する場合のみ）
    pub fn segment(&self, from: BodyMarker, to: BodyMarker) -> Option<Vector2<f32>> {
        let a = self.get(from)?.reference();
        let b = self.get(to)?.reference();
        Some(b - a)
    }
}

/// テスト・リプレイ用: 基準点と上辺幅から正方形マーカーを作る
pub fn square_marker(id: u32, x: f32, y: f32, width: f32) -> Marker {
    Marker::new(
        id,
        [
            Point2::new(x, y),
            Point2::new(x + width, y),
            Point2::new(x + width, y + width),
            Point2::new(x, y + width),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_marker_ids() {
        assert_eq!(BodyMarker::Hip.id(), 1);
        assert_eq!(BodyMarker::Handle.id(), 4);
        assert_eq!(BodyMarker::from_id(2), Some(BodyMarker::Knee));
        assert_eq!(BodyMarker::from_id(3), Some(BodyMarker::Ankle));
        assert_eq!(BodyMarker::from_id(5), None);
        assert_eq!(BodyMarker::from_id(0), None);
    }

    #[test]
    fn test_marker_reference_and_width() {
        let m = square_marker(1, 10.0, 20.0, 5.0);
        assert_eq!(m.reference(), Point2::new(10.0, 20.0));
        assert!((m.edge_width() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_lookup() {
        let frame = MarkerFrame::from_detections(vec![
            square_marker(1, 0.0, 0.0, 10.0),
            square_marker(3, 50.0, 50.0, 10.0),
        ]);
        assert_eq!(frame.len(), 2);
        assert!(frame.get(BodyMarker::Hip).is_some());
        assert!(frame.get(BodyMarker::Knee).is_none());
        assert!(frame.get(BodyMarker::Ankle).is_some());
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let first = square_marker(1, 0.0, 0.0, 10.0);
        let second = square_marker(1, 99.0, 99.0, 10.0);
        let frame = MarkerFrame::from_detections(vec![first, second]);
        assert_eq!(frame.len(), 1);
        // 最初の出現が残る
        assert_eq!(frame.get(BodyMarker::Hip).unwrap().reference(), Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_empty_frame() {
        let frame = MarkerFrame::empty();
        assert!(frame.is_empty());
        assert!(frame.get(BodyMarker::Hip).is_none());
        assert!(frame.segment(BodyMarker::Hip, BodyMarker::Knee).is_none());
    }

    #[test]
    fn test_segment() {
        let frame = MarkerFrame::from_detections(vec![
            square_marker(1, 0.0, 0.0, 10.0),
            square_marker(2, 3.0, 4.0, 10.0),
        ]);
        let v = frame.segment(BodyMarker::Hip, BodyMarker::Knee).unwrap();
        assert_eq!(v, Vector2::new(3.0, 4.0));
    }
}
