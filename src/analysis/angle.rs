use crate::marker::{BodyMarker, MarkerFrame};

/// 大腿角（度）: hip→knee ベクトルの画像水平軸に対する角度
///
/// マーカー1(hip)と2(knee)が両方検出されている場合のみ計算できる。
/// atan2 は全域で定義されるためクランプ不要。
/// 画像座標系はY下向きなので、膝が腰より下にあると正の角度になる。
pub fn femur_angle(frame: &MarkerFrame) -> Option<f32> {
    let femur = frame.segment(BodyMarker::Hip, BodyMarker::Knee)?;
    Some(f32::atan2(femur.y, femur.x).to_degrees())
}

/// 膝関節角（度）: 大腿ベクトル(hip→knee)と脛ベクトル(knee→ankle)のなす内角
///
/// マーカー1, 2, 3が必要。`180 − acos(dot / (|femur|·|shin|))` で計算する。
/// 伸びきった脚（ベクトルが同方向）で180°、直角で90°。
/// マーカー中心が一致してゼロ長ベクトルになった場合は角度が定義できないためNone。
pub fn knee_angle(frame: &MarkerFrame) -> Option<f32> {
    let femur = frame.segment(BodyMarker::Hip, BodyMarker::Knee)?;
    let shin = frame.segment(BodyMarker::Knee, BodyMarker::Ankle)?;

    let norm_product = femur.norm() * shin.norm();
    if norm_product == 0.0 {
        return None;
    }

    // 浮動小数点誤差で |ratio| がわずかに1を超えると acos がNaNになるためクランプ
    let ratio = (femur.dot(&shin) / norm_product).clamp(-1.0, 1.0);
    Some(180.0 - ratio.acos().to_degrees())
}
