use serde::Serialize;

use crate::analysis::angle;
use crate::analysis::{BoundedHistory, HandleTracker, RepCounter, SquatClassifier, Zone};
use crate::config::Config;
use crate::marker::MarkerFrame;

/// 1ティック分の出力レコード
///
/// GUI（ラベル・信号機・グラフ）と音声コラボレーターが消費する全フィールド。
/// rep_counted はこのティックで新しいレップが成立したときのみtrue
/// （音声側はこれを立ち上がり通知として使える）。
#[derive(Debug, Clone, Serialize)]
pub struct SquatUpdate {
    pub femur_angle: Option<f32>,
    pub knee_angle: Option<f32>,
    pub handle_height_cm: Option<f32>,
    pub zone: Zone,
    pub label: &'static str,
    pub rep_counted: bool,
    pub rep_count: u32,
}

/// セッションオーケストレーター
///
/// 外部タイマー（GUI側）が1ティックにつき process を1回呼ぶ。
/// パイプライン全体が同期・シングルスレッドで、ティック間に持ち越す状態は
/// 分類器の armed、レップ数、2つの履歴のみ。どのティック間で停止しても
/// 後始末は不要（外部リソースを保持しない）。
pub struct SquatSession {
    classifier: SquatClassifier,
    counter: RepCounter,
    handle: HandleTracker,
    knee_history: BoundedHistory<f32>,
}

impl SquatSession {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        let capacity = config.session.history_capacity;
        Self {
            classifier: SquatClassifier::from_config(&config.classifier),
            counter: RepCounter::new(),
            handle: HandleTracker::from_config(&config.handle, capacity),
            knee_history: BoundedHistory::new(capacity),
        }
    }

    /// 1ティック分のパイプラインパス:
    /// frame → 角度 → 分類 → カウント、履歴更新
    pub fn process(&mut self, frame: &MarkerFrame) -> SquatUpdate {
        let femur_angle = angle::femur_angle(frame);
        let knee_angle = angle::knee_angle(frame);
        let handle_height_cm = self.handle.update(frame);

        if let Some(knee) = knee_angle {
            self.knee_history.push(knee);
        }

        let classification = self.classifier.update(femur_angle);
        if classification.new_valid_rep {
            self.counter.on_valid_edge();
        }

        SquatUpdate {
            femur_angle,
            knee_angle,
            handle_height_cm,
            zone: classification.zone,
            label: classification.label,
            rep_counted: classification.new_valid_rep,
            rep_count: self.counter.count(),
        }
    }

    pub fn rep_count(&self) -> u32 {
        self.counter.count()
    }

    pub fn knee_angle_history(&self) -> &BoundedHistory<f32> {
        &self.knee_history
    }

    pub fn handle_height_history(&self) -> &BoundedHistory<f32> {
        self.handle.history()
    }

    /// セッションリセット
    ///
    /// カウントとarmedは同じ呼び出しの中で揃ってリセットされるため、
    /// 片方だけ戻った状態が観測されることはない。履歴も合わせてクリアする
    /// （計測停止時の挙動と同じ）。
    pub fn reset(&mut self) {
        self.counter.reset();
        self.classifier.reset();
        self.knee_history.clear();
        self.handle.clear_history();
    }
}

impl Default for SquatSession {
    fn default() -> Self {
        Self::new()
    }
}
