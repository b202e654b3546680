use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EpubError>;

/// Epub转换相关的错误类型
///
/// 变体按错误类别分组：输入错误、描述文件结构错误、引用错误、
/// 合并策略错误，便于测试按类别断言。
#[derive(Error, Debug)]
pub enum EpubError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("Zip文件错误: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML解析错误: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("JSON序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("文件不是有效的EPUB格式: {0}")]
    InvalidEpub(String),

    #[error("缺少mimetype文件")]
    MissingMimetype,

    #[error("无效的mimetype: 期望 {expected}, 找到: {found}")]
    InvalidMimetype { expected: String, found: String },

    /// 描述文件缺少必需元素，路径如 package.metadata.dc:title
    #[error("缺少必需的 {0} 元素")]
    MissingElement(String),

    /// 描述文件元素缺少必需属性
    #[error("{element} 元素缺少必需的 {attribute} 属性")]
    MissingAttribute { element: String, attribute: String },

    /// 清单项ID重复，视为数据完整性错误
    #[error("package.manifest 中存在重复的项目ID: {0}")]
    DuplicateManifestId(String),

    /// 清单、脊柱或目录引用的条目在压缩包中不存在
    #[error("无法找到 {0}")]
    MissingEntry(String),

    #[error("package.spine 中包含非HTML项: {idref} ({media_type})")]
    NonHtmlSpineItem { idref: String, media_type: String },

    #[error("package.spine 中包含非标准路径: {0}")]
    NonStandardPath(String),

    #[error("配置文件错误: {0}")]
    ConfigError(String),
}

/// 必需元素检查辅助函数
///
/// 给定可选值与其元素路径，存在时返回值，缺失时返回
/// 指明完整路径的`MissingElement`错误。
pub fn require<T>(value: Option<T>, path: &str) -> Result<T> {
    value.ok_or_else(|| EpubError::MissingElement(path.to_string()))
}
