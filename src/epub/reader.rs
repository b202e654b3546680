use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use crate::epub::error::{EpubError, Result};

/// 包描述文件在包根目录下的固定文件名
pub const PACKAGE_OPF: &str = "package.opf";

/// 表示一个EPUB文件
///
/// 对zip压缩包的访问封装：按路径查找条目、读取条目内容。
pub struct Epub {
    archive: ZipArchive<File>,
}

impl Epub {
    /// 从文件路径创建Epub实例
    ///
    /// # 参数
    /// * `path` - epub文件的路径
    ///
    /// # 返回值
    /// * `Result<Epub, EpubError>` - 成功返回Epub实例，失败返回错误
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Epub> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(file)?;

        let mut epub = Epub { archive };
        epub.validate()?;

        Ok(epub)
    }

    /// 验证EPUB文件的合法性
    ///
    /// 检查步骤：
    /// 1. 检查是否存在mimetype文件
    /// 2. 验证mimetype文件的内容是否为"application/epub+zip"
    fn validate(&mut self) -> Result<()> {
        let mimetype_file = self.archive.by_name("mimetype");

        match mimetype_file {
            Ok(mut file) => {
                let mut content = String::new();
                file.read_to_string(&mut content)?;

                // 去除可能的换行符和空白字符
                let content = content.trim();
                let expected_mimetype = "application/epub+zip";

                if content != expected_mimetype {
                    return Err(EpubError::InvalidMimetype {
                        expected: expected_mimetype.to_string(),
                        found: content.to_string(),
                    });
                }

                Ok(())
            }
            Err(_) => Err(EpubError::MissingMimetype),
        }
    }

    /// 检查压缩包中是否存在指定条目
    pub fn has_entry(&mut self, path: &str) -> bool {
        self.archive.by_name(path).is_ok()
    }

    /// 读取指定条目的文本内容
    ///
    /// # 参数
    /// * `path` - 条目在压缩包内的路径
    ///
    /// # 返回值
    /// * `Result<String, EpubError>` - 条目内容
    pub fn read_text(&mut self, path: &str) -> Result<String> {
        let mut file = self.archive.by_name(path)?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Ok(content)
    }

    /// 读取指定条目的二进制内容
    ///
    /// # 参数
    /// * `path` - 条目在压缩包内的路径
    ///
    /// # 返回值
    /// * `Result<Vec<u8>, EpubError>` - 条目的二进制内容
    pub fn read_bytes(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut file = self.archive.by_name(path)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    /// 在候选根目录列表中定位包根目录
    ///
    /// 依次检查每个候选目录下是否存在package.opf，返回第一个命中的目录。
    /// 所有候选目录都不包含package.opf时返回`MissingEntry("package.opf")`。
    ///
    /// # 参数
    /// * `roots` - 候选根目录列表，如 ["OPS", "OEBPS"]
    ///
    /// # 返回值
    /// * `Result<String, EpubError>` - 包根目录名
    pub fn package_root(&mut self, roots: &[String]) -> Result<String> {
        for root in roots {
            if self.has_entry(&format!("{}/{}", root, PACKAGE_OPF)) {
                return Ok(root.clone());
            }
        }
        Err(EpubError::MissingEntry(PACKAGE_OPF.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    /// 创建一个测试用的EPUB文件，包根目录可指定
    fn create_test_epub(path: &Path, mimetype_content: &str, root: &str) -> Result<()> {
        let file = File::create(path)?;
        let mut zip = ZipWriter::new(file);

        zip.start_file("mimetype", FileOptions::<()>::default())?;
        zip.write_all(mimetype_content.as_bytes())?;

        zip.start_file(format!("{}/package.opf", root), FileOptions::<()>::default())?;
        let opf_xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0">
    <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
        <dc:title>测试书籍</dc:title>
    </metadata>
    <manifest>
        <item id="page1" href="xhtml/page1.xhtml" media-type="application/xhtml+xml"/>
    </manifest>
    <spine toc="ncx">
        <itemref idref="page1"/>
    </spine>
</package>"#;
        zip.write_all(opf_xml.as_bytes())?;

        zip.start_file(format!("{}/xhtml/page1.xhtml", root), FileOptions::<()>::default())?;
        zip.write_all(b"<html><head></head><body><p>hello</p></body></html>")?;

        zip.finish()?;
        Ok(())
    }

    #[test]
    fn test_valid_epub() {
        let dir = tempdir().unwrap();
        let epub_path = dir.path().join("valid.epub");
        create_test_epub(&epub_path, "application/epub+zip", "OPS").unwrap();

        let result = Epub::from_path(&epub_path);
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_mimetype() {
        let dir = tempdir().unwrap();
        let epub_path = dir.path().join("invalid.epub");
        create_test_epub(&epub_path, "invalid/mimetype", "OPS").unwrap();

        let result = Epub::from_path(&epub_path);
        match result {
            Err(EpubError::InvalidMimetype { expected, found }) => {
                assert_eq!(expected, "application/epub+zip");
                assert_eq!(found, "invalid/mimetype");
            }
            _ => panic!("期望InvalidMimetype错误"),
        }
    }

    #[test]
    fn test_has_entry() {
        let dir = tempdir().unwrap();
        let epub_path = dir.path().join("entries.epub");
        create_test_epub(&epub_path, "application/epub+zip", "OPS").unwrap();

        let mut epub = Epub::from_path(&epub_path).unwrap();
        assert!(epub.has_entry("OPS/package.opf"));
        assert!(epub.has_entry("OPS/xhtml/page1.xhtml"));
        assert!(!epub.has_entry("OPS/xhtml/missing.xhtml"));
    }

    #[test]
    fn test_package_root_primary() {
        let dir = tempdir().unwrap();
        let epub_path = dir.path().join("ops.epub");
        create_test_epub(&epub_path, "application/epub+zip", "OPS").unwrap();

        let mut epub = Epub::from_path(&epub_path).unwrap();
        let roots = vec!["OPS".to_string(), "OEBPS".to_string()];
        assert_eq!(epub.package_root(&roots).unwrap(), "OPS");
    }

    #[test]
    fn test_package_root_fallback() {
        let dir = tempdir().unwrap();
        let epub_path = dir.path().join("oebps.epub");
        create_test_epub(&epub_path, "application/epub+zip", "OEBPS").unwrap();

        let mut epub = Epub::from_path(&epub_path).unwrap();
        let roots = vec!["OPS".to_string(), "OEBPS".to_string()];
        assert_eq!(epub.package_root(&roots).unwrap(), "OEBPS");
    }

    #[test]
    fn test_package_root_missing_names_package_opf() {
        let dir = tempdir().unwrap();
        let epub_path = dir.path().join("rootless.epub");
        create_test_epub(&epub_path, "application/epub+zip", "CONTENT").unwrap();

        let mut epub = Epub::from_path(&epub_path).unwrap();
        let roots = vec!["OPS".to_string(), "OEBPS".to_string()];
        match epub.package_root(&roots) {
            Err(EpubError::MissingEntry(name)) => assert_eq!(name, "package.opf"),
            other => panic!("期望MissingEntry错误, 得到: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_read_text() {
        let dir = tempdir().unwrap();
        let epub_path = dir.path().join("read.epub");
        create_test_epub(&epub_path, "application/epub+zip", "OPS").unwrap();

        let mut epub = Epub::from_path(&epub_path).unwrap();
        let content = epub.read_text("OPS/xhtml/page1.xhtml").unwrap();
        assert!(content.contains("<p>hello</p>"));
    }

    #[test]
    fn test_read_bytes() {
        let dir = tempdir().unwrap();
        let epub_path = dir.path().join("bytes.epub");
        create_test_epub(&epub_path, "application/epub+zip", "OPS").unwrap();

        let mut epub = Epub::from_path(&epub_path).unwrap();
        let bytes = epub.read_bytes("OPS/package.opf").unwrap();
        assert!(!bytes.is_empty());
    }
}
