//! 内存中的假页面，实现 `DomDriver`
//!
//! 结构与真实站点一致：外层页面有 <main> 和 <iframe>；iframe 文档里
//! 第 0 个 <ul> 是字母导航（<div> 子元素），第 1 个 <ul> 是当前字母的按钮、
//! 展开词条的正文块和图片。点击字母会生成一代新的内容节点，旧节点失效。

#![allow(dead_code)]

use std::sync::Mutex;

use glossary_scraper::dom::{DomDriver, Locator};
use glossary_scraper::{Config, Result, ScrapeError};

#[derive(Debug, Clone, Default)]
pub struct FakeEntry {
    pub header: String,
    pub text: Option<String>,
    pub images: Vec<Option<String>>,
}

impl FakeEntry {
    pub fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            ..Default::default()
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.images.push(Some(url.into()));
        self
    }

    /// 没有 src 属性的 <img>
    pub fn image_without_src(mut self) -> Self {
        self.images.push(None);
        self
    }
}

#[derive(Debug, Clone)]
pub struct FakeLetter {
    pub label: String,
    pub entries: Vec<FakeEntry>,
}

impl FakeLetter {
    pub fn new(label: &str, entries: Vec<FakeEntry>) -> Self {
        Self {
            label: label.to_string(),
            entries,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FakeSite {
    pub main: Option<String>,
    pub has_iframe: bool,
    pub has_content_list: bool,
    pub frame_src: String,
    pub letters: Vec<FakeLetter>,
    /// iframe 文档中手风琴之外的图片（例如页脚 logo）
    pub stray_images: Vec<String>,
    /// iframe 始终不可见
    pub frame_hidden: bool,
    /// 始终不可用的字母
    pub disabled_letter: Option<usize>,
    /// 当前字母中始终不可用的按钮
    pub disabled_button: Option<usize>,
}

impl FakeSite {
    pub fn new(letters: Vec<FakeLetter>) -> Self {
        Self {
            main: None,
            has_iframe: true,
            has_content_list: true,
            frame_src: "https://frame.example/glossary".to_string(),
            letters,
            stray_images: Vec::new(),
            frame_hidden: false,
            disabled_letter: None,
            disabled_button: None,
        }
    }

    pub fn with_main(mut self, text: &str) -> Self {
        self.main = Some(text.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FakeNode {
    Main,
    Iframe,
    NavList,
    Letter(usize),
    ContentList(u32),
    Button(u32, usize),
    Panel(u32),
    Image(u32, usize),
    Stray(usize),
}

#[derive(Debug, Default)]
struct State {
    in_frame: bool,
    generation: u32,
    letter: usize,
    expanded: usize,
    visited: Vec<String>,
    scrolls: Vec<(i64, i64)>,
    clicks: Vec<FakeNode>,
}

pub struct FakeDom {
    site: FakeSite,
    state: Mutex<State>,
}

impl FakeDom {
    pub fn new(site: FakeSite) -> Self {
        Self {
            site,
            state: Mutex::new(State::default()),
        }
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.clone()
    }

    pub fn scrolls(&self) -> Vec<(i64, i64)> {
        self.state.lock().unwrap().scrolls.clone()
    }

    pub fn clicks(&self) -> Vec<FakeNode> {
        self.state.lock().unwrap().clicks.clone()
    }

    /// 当前文档中的全部节点，按文档顺序
    fn nodes(&self) -> Vec<FakeNode> {
        let state = self.state.lock().unwrap();
        let mut nodes = Vec::new();
        if !state.in_frame {
            if self.site.main.is_some() {
                nodes.push(FakeNode::Main);
            }
            if self.site.has_iframe {
                nodes.push(FakeNode::Iframe);
            }
            return nodes;
        }

        nodes.push(FakeNode::NavList);
        nodes.extend((0..self.site.letters.len()).map(FakeNode::Letter));

        if self.site.has_content_list {
            if let Some(letter) = self.site.letters.get(state.letter) {
                let gen = state.generation;
                nodes.push(FakeNode::ContentList(gen));
                for (j, entry) in letter.entries.iter().enumerate() {
                    nodes.push(FakeNode::Button(gen, j));
                    if j == state.expanded {
                        if entry.text.is_some() {
                            nodes.push(FakeNode::Panel(gen));
                        }
                        nodes.extend((0..entry.images.len()).map(|k| FakeNode::Image(gen, k)));
                    }
                }
            }
        }

        nodes.extend((0..self.site.stray_images.len()).map(FakeNode::Stray));
        nodes
    }

    fn expanded_entry(&self) -> Option<FakeEntry> {
        let state = self.state.lock().unwrap();
        self.site
            .letters
            .get(state.letter)
            .and_then(|l| l.entries.get(state.expanded))
            .cloned()
    }

    fn ensure_alive(&self, node: &FakeNode) -> Result<()> {
        if self.nodes().contains(node) {
            Ok(())
        } else {
            Err(ScrapeError::StaleElement(format!("{:?}", node)))
        }
    }

    fn tag(node: &FakeNode) -> &'static str {
        match node {
            FakeNode::Main => "main",
            FakeNode::Iframe => "iframe",
            FakeNode::NavList | FakeNode::ContentList(_) => "ul",
            FakeNode::Letter(_) | FakeNode::Panel(_) => "div",
            FakeNode::Button(..) => "button",
            FakeNode::Image(..) | FakeNode::Stray(_) => "img",
        }
    }

    fn parent(node: &FakeNode) -> Option<FakeNode> {
        match node {
            FakeNode::Letter(_) => Some(FakeNode::NavList),
            FakeNode::Button(gen, _) | FakeNode::Image(gen, _) | FakeNode::Panel(gen) => {
                Some(FakeNode::ContentList(*gen))
            }
            _ => None,
        }
    }

    fn raw_attribute(&self, node: &FakeNode, name: &str) -> Option<String> {
        match (node, name) {
            (FakeNode::Iframe, "src") => Some(self.site.frame_src.clone()),
            (FakeNode::Panel(_), "data-hook") => Some("children".to_string()),
            (FakeNode::Image(_, k), "src") => self.expanded_entry()?.images.get(*k).cloned().flatten(),
            (FakeNode::Stray(k), "src") => self.site.stray_images.get(*k).cloned(),
            (FakeNode::Button(_, j), "aria-expanded") => {
                let expanded = self.state.lock().unwrap().expanded == *j;
                Some(expanded.to_string())
            }
            _ => None,
        }
    }
}

/// 支持 `tag`、`.//tag`、`//tag`、`//tag[@attr="value"]`
fn parse_locator(locator: &Locator) -> (bool, String, Option<(String, String)>) {
    let (relative, rest) = match locator {
        Locator::Tag(tag) => return (true, tag.clone(), None),
        Locator::XPath(expr) => {
            if let Some(rest) = expr.strip_prefix(".//") {
                (true, rest)
            } else if let Some(rest) = expr.strip_prefix("//") {
                (false, rest)
            } else {
                panic!("unsupported xpath in fake: {}", expr)
            }
        }
    };
    match rest.split_once("[@") {
        Some((tag, predicate)) => {
            let predicate = predicate.trim_end_matches(']');
            let (attr, value) = predicate.split_once('=').expect("predicate");
            (
                relative,
                tag.to_string(),
                Some((attr.to_string(), value.trim_matches('"').to_string())),
            )
        }
        None => (relative, rest.to_string(), None),
    }
}

impl DomDriver for FakeDom {
    type Node = FakeNode;

    async fn query(&self, scope: Option<&FakeNode>, locator: &Locator) -> Result<Vec<FakeNode>> {
        if let Some(scope) = scope {
            self.ensure_alive(scope)?;
        }
        let (relative, tag, predicate) = parse_locator(locator);
        let found = self
            .nodes()
            .into_iter()
            .filter(|node| Self::tag(node) == tag)
            .filter(|node| match &predicate {
                Some((attr, value)) => self.raw_attribute(node, attr).as_deref() == Some(value.as_str()),
                None => true,
            })
            .filter(|node| match (relative, scope) {
                (true, Some(scope)) => Self::parent(node).as_ref() == Some(scope),
                _ => true,
            })
            .collect();
        Ok(found)
    }

    async fn text(&self, node: &FakeNode) -> Result<String> {
        self.ensure_alive(node)?;
        let state_letter = self.state.lock().unwrap().letter;
        let text = match node {
            FakeNode::Main => self.site.main.clone().unwrap_or_default(),
            FakeNode::Letter(i) => self.site.letters[*i].label.clone(),
            FakeNode::Button(_, j) => self.site.letters[state_letter].entries[*j].header.clone(),
            FakeNode::Panel(_) => self
                .expanded_entry()
                .and_then(|e| e.text)
                .unwrap_or_default(),
            _ => String::new(),
        };
        Ok(text)
    }

    async fn attribute(&self, node: &FakeNode, name: &str) -> Result<Option<String>> {
        self.ensure_alive(node)?;
        Ok(self.raw_attribute(node, name))
    }

    async fn click(&self, node: &FakeNode) -> Result<()> {
        self.ensure_alive(node)?;
        let mut state = self.state.lock().unwrap();
        state.clicks.push(node.clone());
        match node {
            FakeNode::Letter(i) => {
                state.letter = *i;
                state.generation += 1;
                state.expanded = 0;
            }
            FakeNode::Button(_, j) => state.expanded = *j,
            _ => {}
        }
        Ok(())
    }

    async fn is_displayed(&self, node: &FakeNode) -> Result<bool> {
        self.ensure_alive(node)?;
        Ok(!(self.site.frame_hidden && *node == FakeNode::Iframe))
    }

    async fn is_enabled(&self, node: &FakeNode) -> Result<bool> {
        self.ensure_alive(node)?;
        let disabled = match node {
            FakeNode::Letter(i) => self.site.disabled_letter == Some(*i),
            FakeNode::Button(_, j) => self.site.disabled_button == Some(*j),
            _ => false,
        };
        Ok(!disabled)
    }

    async fn goto(&self, url: &str) -> Result<()> {
        self.state.lock().unwrap().visited.push(url.to_string());
        Ok(())
    }

    async fn scroll_to(&self, x: i64, y: i64) -> Result<()> {
        self.state.lock().unwrap().scrolls.push((x, y));
        Ok(())
    }

    async fn is_ready(&self) -> Result<bool> {
        Ok(true)
    }

    async fn enter_frame(&self, frame: &FakeNode) -> Result<()> {
        self.ensure_alive(frame)?;
        let src = self.raw_attribute(frame, "src").unwrap_or_default();
        let mut state = self.state.lock().unwrap();
        state.visited.push(src);
        state.in_frame = true;
        Ok(())
    }
}

/// 所有等待都立即结束的配置
pub fn fast_config(image_dir: &std::path::Path) -> Config {
    Config {
        target_url: "https://site.example/japan-a-z".to_string(),
        image_dir: image_dir.to_path_buf(),
        output_json: image_dir.join("out.json"),
        page_settle_secs: 0,
        letter_settle_secs: 0,
        entry_settle_secs: 0,
        frame_timeout_secs: 1,
        implicit_wait_secs: 0,
        poll_interval_ms: 1,
        ..Config::default()
    }
}
