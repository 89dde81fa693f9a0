use std::fmt;

/// 请求项的归属桶
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Header,
    Param,
    Data,
    File,
}

/// 请求项分隔符
///
/// 每个分隔符同时决定了请求项进入哪个桶以及值如何解释。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `:` Header，空值表示移除该 Header
    Header,
    /// `;` 空字符串 Header
    HeaderEmpty,
    /// `==` URL 查询参数
    QueryParam,
    /// `=` 字符串数据字段
    DataString,
    /// `:=` JSON 数据字段
    DataRawJson,
    /// `@` 上传文件
    FileUpload,
    /// `=@` 以文本形式嵌入文件内容
    DataEmbedFile,
    /// `:=@` 以 JSON 形式嵌入文件内容
    DataEmbedRawJsonFile,
}

impl Separator {
    /// 全部分隔符，按长度降序排列，保证同一位置优先匹配最长分隔符
    pub const ALL: &'static [Separator] = &[
        Separator::DataEmbedRawJsonFile,
        Separator::QueryParam,
        Separator::DataRawJson,
        Separator::DataEmbedFile,
        Separator::Header,
        Separator::HeaderEmpty,
        Separator::DataString,
        Separator::FileUpload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::Header => ":",
            Separator::HeaderEmpty => ";",
            Separator::QueryParam => "==",
            Separator::DataString => "=",
            Separator::DataRawJson => ":=",
            Separator::FileUpload => "@",
            Separator::DataEmbedFile => "=@",
            Separator::DataEmbedRawJsonFile => ":=@",
        }
    }

    pub fn bucket(&self) -> Bucket {
        match self {
            Separator::Header | Separator::HeaderEmpty => Bucket::Header,
            Separator::QueryParam => Bucket::Param,
            Separator::DataString
            | Separator::DataRawJson
            | Separator::DataEmbedFile
            | Separator::DataEmbedRawJsonFile => Bucket::Data,
            Separator::FileUpload => Bucket::File,
        }
    }

    /// 判断字符是否出现在给定分隔符集合中（即可被反斜杠转义）
    pub fn is_special_char(seps: &[Separator], c: char) -> bool {
        seps.iter().any(|sep| sep.as_str().contains(c))
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
