//! 分隔符列表编解码 (模块原则：清晰分离的编解码逻辑)
//!
//! 把形如 `a;b;c` 的标量值与有序段列表互相转换。
//! 解码负责去空白和丢弃空段；编码信任已归一化的输入，但仍会
//! 过滤空白段，避免产生多余的分隔符。

/// 路径列表分隔符
pub const DELIMITER: char = ';';

/// 路径列表编解码器
pub struct PathListCodec;

impl PathListCodec {
    /// 将标量值解码为有序的非空段列表
    ///
    /// 按分隔符拆分，丢弃拆分产生的空段，去除每段首尾空白，保持原有顺序。
    #[must_use]
    pub fn decode(value: &str) -> Vec<String> {
        value
            .split(DELIMITER)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// 将段列表编码回标量值
    ///
    /// 过滤空白段后按当前顺序以分隔符拼接，不重新去空白。
    #[must_use]
    pub fn encode<'a, I>(segments: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sep = DELIMITER.to_string();
        segments
            .into_iter()
            .filter(|segment| !segment.trim().is_empty())
            .collect::<Vec<_>>()
            .join(sep.as_str())
    }

    /// 值是否应按多值（路径列表）处理
    ///
    /// 纯内容判定：原始字符串包含至少一个分隔符。每次打开编辑时
    /// 重新推导，不作为标志持久化。
    #[must_use]
    pub fn is_multi_value(value: &str) -> bool {
        value.contains(DELIMITER)
    }
}
