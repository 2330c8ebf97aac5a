use crate::config::ClassifierConfig;
use serde::Serialize;

/// 大腿角の3ゾーン分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Zone {
    Invalid,
    Approaching,
    Valid,
}

/// 1ティック分の分類結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub zone: Zone,
    /// GUIの信号機ラベル
    pub label: &'static str,
    /// このティックで新しい有効スクワットが成立した（1サイクルにつき1回だけtrue）
    pub new_valid_rep: bool,
}

/// ヒステリシス付きスクワット分類器（Mooreマシン）
///
/// ティック間で持ち越す状態は armed フラグのみ。
/// 大腿角はスクワット最下点で複数フレーム連続して負になるため、
/// Invalid/Approachingゾーンを経由したときだけ armed になり、
/// Validゾーン進入時に一度だけ立ち上がりエッジを出す。
/// これで「1回の invalid→valid 往復 = 1レップ」が保証される。
pub struct SquatClassifier {
    valid_threshold_deg: f32,
    approaching_threshold_deg: f32,
    armed: bool,
}

impl SquatClassifier {
    pub fn new(valid_threshold_deg: f32, approaching_threshold_deg: f32) -> Self {
        Self {
            valid_threshold_deg,
            approaching_threshold_deg,
            armed: false,
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.valid_threshold_deg, config.approaching_threshold_deg)
    }

    /// 現ティックの大腿角（未検出ならNone）から分類を更新する
    pub fn update(&mut self, femur_angle_deg: Option<f32>) -> Classification {
        let angle = match femur_angle_deg {
            Some(angle) => angle,
            None => {
                // マーカー未検出: サイクルを仕切り直す
                self.armed = false;
                return Classification {
                    zone: Zone::Invalid,
                    label: "No Squat Detected",
                    new_valid_rep: false,
                };
            }
        };

        if angle < self.valid_threshold_deg {
            let new_valid_rep = self.armed;
            // 底で連続する負の角度が再発火しないよう武装解除
            self.armed = false;
            Classification {
                zone: Zone::Valid,
                label: "Squat Valid",
                new_valid_rep,
            }
        } else if angle <= self.approaching_threshold_deg {
            self.armed = true;
            Classification {
                zone: Zone::Approaching,
                label: "Almost There",
                new_valid_rep: false,
            }
        } else {
            self.armed = true;
            Classification {
                zone: Zone::Invalid,
                label: "Squat Invalid",
                new_valid_rep: false,
            }
        }
    }

    pub fn armed(&self) -> bool {
        self.armed
    }

    /// セッションリセット: armed を既知の初期値に戻す
    /// （リセット直後の偽レップ発火を防ぐ）
    pub fn reset(&mut self) {
        self.armed = false;
    }
}

impl Default for SquatClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}
