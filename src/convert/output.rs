//! 输出写入模块
//!
//! 负责把转换产物写入输出目录：写入前确保父目录存在。

use crate::epub::error::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 输出目录写入器
///
/// 所有产物路径都相对于输出根目录；每次写入独立完成，
/// 产物之间没有事务关系。
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    /// 创建指向输出根目录的写入器
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// 输出根目录
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 写入二进制内容到相对路径，自动创建父目录
    ///
    /// # 参数
    /// * `rel_path` - 相对输出根目录的路径，如 "images/cover.jpg"
    /// * `bytes` - 要写入的内容
    pub fn write_bytes(&self, rel_path: &str, bytes: &[u8]) -> Result<()> {
        let path = self.root.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(())
    }

    /// 把值序列化为带缩进的JSON并写入相对路径
    pub fn write_json<T: Serialize>(&self, rel_path: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.write_bytes(rel_path, json.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_bytes_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());

        writer.write_bytes("a/b/c.bin", b"data").unwrap();

        let written = fs::read(dir.path().join("a/b/c.bin")).unwrap();
        assert_eq!(written, b"data");
    }

    #[test]
    fn test_write_json_is_pretty() {
        let dir = tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());

        #[derive(Serialize)]
        struct Record {
            title: String,
        }
        writer
            .write_json(
                "record.json",
                &Record {
                    title: "样例".to_string(),
                },
            )
            .unwrap();

        let content = fs::read_to_string(dir.path().join("record.json")).unwrap();
        assert!(content.contains("\n  \"title\""));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());

        writer.write_bytes("file.txt", b"first").unwrap();
        writer.write_bytes("file.txt", b"second").unwrap();

        let written = fs::read(dir.path().join("file.txt")).unwrap();
        assert_eq!(written, b"second");
    }
}
