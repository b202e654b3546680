//! NCX导航元素数据结构定义
//!
//! 定义NCX文件中的各种导航元素。可选字段用`Option`保留
//! "元素存在但内容缺失"与"元素缺失"的区别，目录构建时
//! 据此给出准确的元素路径诊断。

/// 文档标题
#[derive(Debug, Clone)]
pub struct DocTitle {
    /// 标题文本
    pub text: String,
}

impl DocTitle {
    /// 创建新的文档标题
    pub fn new(text: String) -> Self {
        Self { text }
    }
}

/// 导航标签
#[derive(Debug, Clone, Default)]
pub struct NavLabel {
    /// 标签文本，text子元素缺失时为None
    pub text: Option<String>,
}

impl NavLabel {
    /// 创建新的导航标签
    pub fn new(text: Option<String>) -> Self {
        Self { text }
    }
}

/// 导航内容引用
#[derive(Debug, Clone, Default)]
pub struct NavContent {
    /// 源文件路径，src属性缺失时为None
    pub src: Option<String>,
}

impl NavContent {
    /// 创建新的导航内容引用
    pub fn new(src: Option<String>) -> Self {
        Self { src }
    }
}

/// 导航点
///
/// 子导航点保持文档顺序，嵌套深度不限。
#[derive(Debug, Clone)]
pub struct NavPoint {
    /// 唯一标识符
    pub id: String,
    /// 导航标签，元素缺失时为None
    pub nav_label: Option<NavLabel>,
    /// 内容引用，元素缺失时为None
    pub content: Option<NavContent>,
    /// 子导航点
    pub children: Vec<NavPoint>,
}

impl NavPoint {
    /// 创建新的导航点
    pub fn new(id: String) -> Self {
        Self {
            id,
            nav_label: None,
            content: None,
            children: Vec::new(),
        }
    }

    /// 添加子导航点
    pub fn add_child(&mut self, child: NavPoint) {
        self.children.push(child);
    }
}

/// 导航地图
#[derive(Debug, Clone, Default)]
pub struct NavMap {
    /// 导航点列表，保持文档顺序
    pub nav_points: Vec<NavPoint>,
}

impl NavMap {
    /// 创建新的导航地图
    pub fn new() -> Self {
        Self {
            nav_points: Vec::new(),
        }
    }

    /// 添加导航点
    pub fn add_nav_point(&mut self, nav_point: NavPoint) {
        self.nav_points.push(nav_point);
    }
}
