//! 清单模块
//!
//! 提供EPUB包中文件清单的结构定义。

/// NCX目录文件的媒体类型
pub const NCX_MEDIA_TYPE: &str = "application/x-dtbncx+xml";

/// XHTML内容文件的媒体类型
pub const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";

/// 清单项信息
#[derive(Debug, Clone)]
pub struct ManifestItem {
    /// 项目ID
    pub id: String,
    /// 文件路径(相对于包根目录)
    pub href: String,
    /// 媒体类型
    pub media_type: String,
}

impl ManifestItem {
    /// 创建新的清单项
    pub fn new(id: String, href: String, media_type: String) -> Self {
        Self {
            id,
            href,
            media_type,
        }
    }

    /// 检查是否为图片文件
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    /// 检查是否为文本类资源(CSS等)
    pub fn is_text(&self) -> bool {
        self.media_type.starts_with("text/")
    }

    /// 检查是否为XHTML文件
    pub fn is_xhtml(&self) -> bool {
        self.media_type == XHTML_MEDIA_TYPE
    }

    /// 检查是否为NCX目录文件
    pub fn is_ncx(&self) -> bool {
        self.media_type == NCX_MEDIA_TYPE
    }

    /// 检查是否为需要复制到输出目录的资源(图片或文本类)
    pub fn is_asset(&self) -> bool {
        self.is_image() || self.is_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(media_type: &str) -> ManifestItem {
        ManifestItem::new(
            "id".to_string(),
            "path".to_string(),
            media_type.to_string(),
        )
    }

    #[test]
    fn test_asset_predicates() {
        assert!(item("image/jpeg").is_asset());
        assert!(item("image/png").is_asset());
        assert!(item("text/css").is_asset());
        // NCX和XHTML不属于复制范围
        assert!(!item(NCX_MEDIA_TYPE).is_asset());
        assert!(!item(XHTML_MEDIA_TYPE).is_asset());
    }

    #[test]
    fn test_type_predicates() {
        assert!(item(XHTML_MEDIA_TYPE).is_xhtml());
        assert!(item(NCX_MEDIA_TYPE).is_ncx());
        assert!(!item("text/css").is_xhtml());
    }
}
