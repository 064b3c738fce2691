//! 寄存器报文解码
//!
//! 纯函数，无 I/O。报文按字内大端解释（tokio-modbus 已交付为 u16
//! 字序列）；仅当报文恰为一个字时产出数值，其余长度静默跳过，由
//! 调用方据 `None` 略过该寄存器。

/// 解码单字报文：`round(i16 × scale, 2)`。
///
/// 长度不为 1 的报文不解码，返回 `None`（"无数据"，而非错误）。
pub fn decode_single_word(words: &[u16], scale: f64) -> Option<f64> {
    if words.len() != 1 {
        return None;
    }
    Some(round2(words[0] as i16 as f64 * scale))
}

/// 四舍五入到 2 位小数。
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_positive() {
        assert_eq!(decode_single_word(&[250], 0.1), Some(25.0));
        assert_eq!(decode_single_word(&[1234], 0.01), Some(12.34));
    }

    #[test]
    fn test_decode_negative() {
        // 大端单字按有符号 16 位解释
        assert_eq!(decode_single_word(&[(-105i16) as u16], 0.1), Some(-10.5));
        assert_eq!(decode_single_word(&[i16::MIN as u16], 0.1), Some(-3276.8));
    }

    #[test]
    fn test_decode_rounding() {
        assert_eq!(decode_single_word(&[333], 0.033), Some(10.99));
    }

    #[test]
    fn test_decode_range_bound() {
        // 解码结果不超出 ±(2^15 × scale)
        let max = decode_single_word(&[i16::MAX as u16], 0.1).unwrap();
        let min = decode_single_word(&[i16::MIN as u16], 0.1).unwrap();
        assert!(max.abs() <= 32768.0 * 0.1);
        assert!(min.abs() <= 32768.0 * 0.1);
    }

    #[test]
    fn test_unexpected_length_skipped() {
        assert_eq!(decode_single_word(&[], 0.1), None);
        assert_eq!(decode_single_word(&[1, 2], 0.1), None);
        assert_eq!(decode_single_word(&[1, 2, 3, 4], 0.1), None);
    }
}
