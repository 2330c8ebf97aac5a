use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub handle: HandleConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClassifierConfig {
    /// 有効スクワット判定の大腿角しきい値（度）: これ未満でValid
    #[serde(default = "default_valid_threshold")]
    pub valid_threshold_deg: f32,
    /// Approachingゾーン上限（度）: これ以下でApproaching、超えるとInvalid
    #[serde(default = "default_approaching_threshold")]
    pub approaching_threshold_deg: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HandleConfig {
    /// マーカーの物理辺長（cm）: ピクセル→cm換算の基準
    #[serde(default = "default_marker_width")]
    pub marker_width_cm: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// 膝角・ハンドル高さ履歴の保持サンプル数
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_valid_threshold() -> f32 { 0.0 }
fn default_approaching_threshold() -> f32 { 10.0 }
fn default_marker_width() -> f32 { 5.7 }
fn default_history_capacity() -> usize { 100 }

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            valid_threshold_deg: default_valid_threshold(),
            approaching_threshold_deg: default_approaching_threshold(),
        }
    }
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            marker_width_cm: default_marker_width(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// ファイルが無い・読めない場合はデフォルト設定を返す
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
