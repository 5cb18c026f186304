use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;

/// 社保报销基数 BRSS (semelles orthopédiques, pointure > 37): 28.86
pub fn reference_base() -> BigDecimal {
    BigDecimal::new(2886.into(), 2)
}

/// 社保法定报销比例: 60%
pub fn social_security_rate() -> BigDecimal {
    BigDecimal::new(60.into(), 2)
}

/// 百分比转小数 (230 -> 2.30)
pub fn percent(value: &BigDecimal) -> BigDecimal {
    value * BigDecimal::new(1.into(), 2)
}

/// 输出金额统一保留两位小数, 四舍五入 (half-up)
pub fn round_money(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

/// 两位小数文本, 如 "150.00"
pub fn format_money(value: &BigDecimal) -> String {
    round_money(value).to_string()
}

/// 解析调用方传入的金额字符串
pub fn parse(raw: &str) -> Option<BigDecimal> {
    BigDecimal::from_str(raw.trim()).ok()
}

/// 金额以 JSON number 输出
pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text = value.to_string();
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => serializer.serialize_f64(v),
        _ => serializer.serialize_str(&text),
    }
}

/// 数据文件中金额可以是 number 或字符串
pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawAmount::deserialize(deserializer)?;
    raw.into_decimal().map_err(serde::de::Error::custom)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawAmount {
    fn into_decimal(self) -> Result<BigDecimal, String> {
        match self {
            RawAmount::Int(v) => Ok(BigDecimal::from(v)),
            // f64 的 Display 是最短可回读表示, 28.86 -> "28.86"
            RawAmount::Float(v) if v.is_finite() => {
                BigDecimal::from_str(&v.to_string()).map_err(|e| e.to_string())
            }
            RawAmount::Float(v) => Err(format!("non-finite amount: {}", v)),
            RawAmount::Text(s) => {
                BigDecimal::from_str(s.trim()).map_err(|_| format!("invalid amount: {:?}", s))
            }
        }
    }
}

/// 可选金额字段 (`null` 或缺失 -> None)
pub mod option {
    use super::RawAmount;
    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<BigDecimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => super::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawAmount>::deserialize(deserializer)? {
            Some(raw) => raw.into_decimal().map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
