//! 转换配置模块
//!
//! 提供转换管线的配置管理功能，支持从YAML文件加载配置。

use crate::epub::error::{EpubError, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// 默认配置文件路径
const DEFAULT_CONFIG_PATH: &str = "convert.yaml";

/// 转换管线配置
///
/// `package_roots`是包根目录的候选列表，按顺序查找package.opf；
/// `content_dir`是XHTML内容所在的子目录，合并后的文档也输出到
/// 该目录下，以保持页面中相对资源路径有效。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// 包根目录候选列表(按查找顺序)
    pub package_roots: Vec<String>,
    /// XHTML内容子目录
    pub content_dir: String,
}

impl ConvertConfig {
    /// 从默认配置文件中加载转换配置
    ///
    /// 配置文件默认为当前目录下的 `convert.yaml`
    ///
    /// # 返回值
    /// * `Result<Self>` - 加载成功返回配置实例，失败返回错误
    pub fn from_file() -> Result<Self> {
        let content = fs::read_to_string(DEFAULT_CONFIG_PATH)
            .map_err(|e| EpubError::ConfigError(format!("无法读取配置文件: {}", e)))?;

        serde_yml::from_str(&content)
            .map_err(|e| EpubError::ConfigError(format!("配置文件格式错误: {}", e)))
    }

    /// 生成默认配置文件到当前目录
    ///
    /// 配置文件将生成为当前目录下的 `convert.yaml`
    ///
    /// # 返回值
    /// * `Result<()>` - 生成成功返回Ok，失败返回错误
    pub fn generate_default_config() -> Result<()> {
        let default_config = Self::default_config();
        let yaml_content = serde_yml::to_string(&default_config)
            .map_err(|e| EpubError::ConfigError(format!("序列化配置失败: {}", e)))?;

        // 在YAML内容前添加注释说明
        let content_with_header = format!(
            "# 转换配置文件\n# package_roots: 包根目录候选列表，按顺序查找package.opf\n# content_dir: XHTML内容所在的子目录\n\n{}",
            yaml_content
        );

        fs::write(DEFAULT_CONFIG_PATH, content_with_header)
            .map_err(|e| EpubError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }

    /// 获取默认配置
    ///
    /// # 返回值
    /// * `Self` - 默认配置实例
    pub fn default_config() -> Self {
        Self {
            package_roots: vec!["OPS".to_string(), "OEBPS".to_string()],
            content_dir: "xhtml".to_string(),
        }
    }

    /// 尝试从默认配置文件加载，如果文件不存在则先生成配置文件再加载
    ///
    /// 配置文件为当前目录下的 `convert.yaml`
    ///
    /// # 返回值
    /// * `Self` - 配置实例
    pub fn new() -> Self {
        // 首先尝试从文件加载
        match Self::from_file() {
            Ok(config) => config,
            Err(_) => {
                // 如果文件不存在，先生成默认配置文件
                let _ = Self::generate_default_config();
                Self::default_config()
            }
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
