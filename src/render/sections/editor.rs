//! Code-editor panel: explorer, tabs, breadcrumb and highlighted source.
//!
//! The main file is a class generated from the personal data; the other
//! virtual files listed in `[editor].files` get placeholder content chosen by
//! extension. All file bodies are rendered to highlighted HTML here so the
//! page runtime only swaps markup when a tab is switched.
//!
//! Files created from the explorer's new-file button use the same
//! placeholders: the manifest carries one [`FileTemplate`] per known extension
//! with the file name and stem left as tokens for the runtime to fill in.

use crate::data::Portfolio;
use crate::interact::{Action, Binding, Opened, TabSet, Typing};
use crate::render::{Built, Context, Fragment, Identity, Section, html::{escape, escape_attr}};
use serde::Serialize;

// ============================================================================
// Virtual files
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Java,
    Json,
    Markdown,
    Xml,
    TypeScript,
    JavaScript,
    Other,
}

impl FileKind {
    pub fn from_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "java" => Self::Java,
            "json" => Self::Json,
            "md" => Self::Markdown,
            "xml" => Self::Xml,
            "ts" | "tsx" => Self::TypeScript,
            "js" | "jsx" => Self::JavaScript,
            _ => Self::Other,
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Java => "☕",
            Self::Json => "{ }",
            Self::Markdown => "📝",
            Self::TypeScript => "🔷",
            Self::JavaScript => "🟨",
            Self::Xml | Self::Other => "📄",
        }
    }

    /// CSS modifier of the file icon.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Json => "json",
            Self::Markdown => "md",
            Self::Xml => "xml",
            Self::TypeScript => "ts",
            Self::JavaScript => "js",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualFile {
    pub name: String,
    pub icon: &'static str,
    pub class: &'static str,
    pub lines: usize,
    /// Highlighted source, already escaped.
    pub html: String,
}

impl VirtualFile {
    fn new(name: &str, source: Source) -> Self {
        let kind = FileKind::from_name(name);
        Self {
            name: name.to_owned(),
            icon: kind.icon(),
            class: kind.class(),
            lines: source.lines.len(),
            html: source.lines.join("\n"),
        }
    }

    /// Placeholder content chosen by extension.
    pub fn placeholder(name: &str) -> Self {
        let template = FileTemplate::for_name(name);
        Self {
            name: name.to_owned(),
            icon: template.icon,
            class: template.class,
            lines: template.lines,
            html: template.instantiate(name),
        }
    }

    /// The class generated from the personal data.
    pub fn main(portfolio: &Portfolio, identity: &Identity, extension: &str) -> Self {
        let personal = &portfolio.personal;
        let package = identity.package(portfolio.code.package.as_deref());
        let mut src = Source::default();

        src.line().kw("package").text(" ").namespace(&package).text(";");
        src.blank();
        src.line().kw("import").text(" ").namespace("java.util.List").text(";");
        src.blank();
        src.line().comment("/**");
        src.line().comment(&format!(" * {}", personal.role));
        src.line().comment(&format!(" * @author {}", personal.name));
        src.line().comment(" */");
        src.line()
            .kw("public class")
            .text(" ")
            .class(&identity.class_name)
            .text(" ")
            .kw("implements")
            .text(" ")
            .class("Engineer")
            .text(" {");
        src.blank();

        let constants = [
            ("NAME", Some(personal.name.as_str())),
            ("ROLE", Some(personal.role.as_str())),
            ("YEARS_EXP", personal.years_experience.as_deref()),
            ("LOCATION", personal.location.as_deref()),
        ];
        for (constant, value) in constants {
            let Some(value) = value else { continue };
            src.line()
                .text("    ")
                .kw("private static final")
                .text(" ")
                .class("String")
                .text(&format!(" {constant} = "))
                .string(&format!("\"{value}\""))
                .text(";");
        }
        src.blank();

        let expertise = &portfolio.expertise;
        if expertise.is_empty() {
            src.line()
                .text("    ")
                .kw("private")
                .text(" ")
                .class("List")
                .text("<")
                .class("String")
                .text("> expertise = List.of();");
        } else {
            src.line()
                .text("    ")
                .kw("private")
                .text(" ")
                .class("List")
                .text("<")
                .class("String")
                .text("> expertise = List.of(");
            for (i, item) in expertise.iter().enumerate() {
                let sep = if i + 1 < expertise.len() { "," } else { "" };
                src.line()
                    .text("        ")
                    .string(&format!("\"{item}\""))
                    .text(sep);
            }
            src.line().text("    );");
        }
        src.blank();

        src.line()
            .text("    ")
            .kw("public boolean")
            .text(" ")
            .method("isAvailable")
            .text("() {");
        src.line()
            .text("        ")
            .kw("return")
            .text(" ")
            .kw(if personal.available { "true" } else { "false" })
            .text(";");
        src.line().text("    }");
        src.line().text("}");

        Self::new(&identity.file_name(extension), src)
    }
}

/// Token replaced by the file name in a [`FileTemplate`].
pub const NAME_TOKEN: &str = "{{name}}";

/// Token replaced by the file name without its extension.
pub const STEM_TOKEN: &str = "{{stem}}";

/// Extensions with their own icon or placeholder; `""` covers everything else.
const TEMPLATE_EXTENSIONS: &[&str] = &["java", "json", "md", "xml", "ts", "tsx", "js", "jsx", ""];

/// Placeholder for a file created in the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTemplate {
    pub extension: &'static str,
    pub icon: &'static str,
    pub class: &'static str,
    pub lines: usize,
    /// Highlighted source containing [`NAME_TOKEN`] and [`STEM_TOKEN`].
    pub html: String,
}

impl FileTemplate {
    fn for_extension(extension: &'static str) -> Self {
        let kind = FileKind::from_name(&format!("{STEM_TOKEN}.{extension}"));
        let source = placeholder_source(extension);
        Self {
            extension,
            icon: kind.icon(),
            class: kind.class(),
            lines: source.lines.len(),
            html: source.lines.join("\n"),
        }
    }

    fn for_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let extension = TEMPLATE_EXTENSIONS
            .iter()
            .find(|known| **known == ext)
            .copied()
            .unwrap_or("");
        Self::for_extension(extension)
    }

    pub fn all() -> Vec<Self> {
        TEMPLATE_EXTENSIONS.iter().map(|ext| Self::for_extension(ext)).collect()
    }

    /// Resolve the tokens for `name`; the values are escaped here.
    pub fn instantiate(&self, name: &str) -> String {
        let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
        self.html
            .replace(NAME_TOKEN, &escape(name))
            .replace(STEM_TOKEN, &escape(stem))
    }
}

/// Placeholder source for `ext`, with the name and stem left as tokens.
fn placeholder_source(ext: &str) -> Source {
    let (name, stem) = (NAME_TOKEN, STEM_TOKEN);
    let mut src = Source::default();
    match ext {
        "java" => {
            src.line().kw("public class").text(" ").class(stem).text(" {");
            src.line().text("    ").comment("// Your code here");
            src.blank();
            src.line()
                .text("    ")
                .kw("public static void")
                .text(" ")
                .method("main")
                .text("(")
                .class("String")
                .text("[] args) {");
            src.line()
                .text("        ")
                .class("System")
                .text(".out.")
                .method("println")
                .text("(")
                .string("\"Hello, World!\"")
                .text(");");
            src.line().text("    }");
            src.line().text("}");
        }
        "json" => {
            src.line().text("{");
            src.line()
                .text("  ")
                .string("\"name\"")
                .text(": ")
                .string(&format!("\"{stem}\""))
                .text(",");
            src.line()
                .text("  ")
                .string("\"version\"")
                .text(": ")
                .string("\"1.0.0\"");
            src.line().text("}");
        }
        "js" => {
            src.line().comment(&format!("// {name}"));
            src.blank();
            src.line()
                .kw("const")
                .text(" ")
                .method("init")
                .text(" = () => {");
            src.line()
                .text("    console.")
                .method("log")
                .text("(")
                .string("'Hello, World!'")
                .text(");");
            src.line().text("};");
            src.blank();
            src.line().method("init").text("();");
        }
        _ => {
            src.line().comment(&format!("// {name}"));
            src.line().comment("// Start coding here...");
        }
    }

    src
}

/// Highlighted source, one HTML string per line.
#[derive(Default)]
struct Source {
    lines: Vec<String>,
}

impl Source {
    fn line(&mut self) -> Line<'_> {
        self.lines.push(String::new());
        let last = self.lines.len() - 1;
        Line(&mut self.lines[last])
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }
}

struct Line<'a>(&'a mut String);

impl Line<'_> {
    fn span(self, class: &str, text: &str) -> Self {
        self.0
            .push_str(&format!(r#"<span class="{class}">{}</span>"#, escape(text)));
        self
    }

    fn text(self, text: &str) -> Self {
        self.0.push_str(&escape(text));
        self
    }

    fn kw(self, text: &str) -> Self {
        self.span("keyword", text)
    }

    fn class(self, text: &str) -> Self {
        self.span("class-name", text)
    }

    fn method(self, text: &str) -> Self {
        self.span("method", text)
    }

    fn string(self, text: &str) -> Self {
        self.span("string", text)
    }

    fn comment(self, text: &str) -> Self {
        self.span("comment", text)
    }

    fn namespace(self, text: &str) -> Self {
        self.span("namespace", text)
    }
}

// ============================================================================
// Editor state
// ============================================================================

/// Open tabs and the contents of every virtual file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorState {
    pub tabs: TabSet,
    pub files: Vec<VirtualFile>,
    /// Suggested name for a new file.
    pub new_file: String,
    pub templates: Vec<FileTemplate>,
}

impl EditorState {
    /// Main file active, followed by `extra` in order.
    pub fn new(portfolio: &Portfolio, identity: &Identity, extension: &str, extra: &[String]) -> Self {
        let main = VirtualFile::main(portfolio, identity, extension);
        let main_name = main.name.clone();
        let mut state = Self {
            tabs: TabSet::new(main.name.clone()),
            files: vec![main],
            new_file: format!("NewFile.{extension}"),
            templates: FileTemplate::all(),
        };

        for name in extra {
            state.create_file(name);
        }
        state.tabs.open(&main_name);
        state
    }

    /// Open `name`, creating it with placeholder content if absent.
    ///
    /// Blank names are ignored.
    pub fn create_file(&mut self, name: &str) -> Option<Opened> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let opened = self.tabs.open(name);
        if opened == Opened::Created {
            self.files.push(VirtualFile::placeholder(name));
        }
        Some(opened)
    }

    pub fn file(&self, name: &str) -> Option<&VirtualFile> {
        self.files.iter().find(|f| f.name == name)
    }

    fn active_file(&self) -> Option<&VirtualFile> {
        self.file(self.tabs.active())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Element holding the highlighted lines of the active file.
const CODE_SELECTOR: &str = ".code-content code";

pub struct Editor;

impl Section for Editor {
    fn mount(&self) -> &'static str {
        "editor"
    }

    fn build(&self, ctx: &Context<'_>) -> Built {
        let state = &ctx.editor;
        let Some(active) = state.active_file() else {
            return Built::Absent("no active file");
        };
        let project = format!("{}-portfolio", ctx.identity.handle);
        let mut html = String::new();

        html.push_str(&format!(
            r#"<div class="editor-window"><div class="editor-titlebar"><span class="dot red"></span><span class="dot yellow"></span><span class="dot green"></span><span class="editor-title">{}</span></div><div class="editor-body">"#,
            escape(&project)
        ));

        // Explorer
        html.push_str(&format!(
            r#"<aside class="explorer"><div class="explorer-header">EXPLORER<button type="button" class="new-file-btn" title="New file">+</button></div><div class="folder open"><div class="folder-name">📁 {}</div><div class="folder-contents">"#,
            escape(&project)
        ));
        for file in &state.files {
            html.push_str(&format!(
                r#"<div class="file{}" data-file="{}"><span class="file-icon {}">{}</span>{}</div>"#,
                active_class(state, &file.name),
                escape_attr(&file.name),
                file.class,
                escape(file.icon),
                escape(&file.name)
            ));
        }
        html.push_str("</div></div></aside>");

        // Tabs
        html.push_str(r#"<div class="editor-main"><div class="editor-tabs">"#);
        for name in state.tabs.tabs() {
            let kind = FileKind::from_name(name);
            html.push_str(&format!(
                r#"<div class="tab{}" data-file="{name_attr}"><span class="file-icon {}">{}</span>{}<span class="tab-close" data-file="{name_attr}">×</span></div>"#,
                active_class(state, name),
                kind.class(),
                escape(kind.icon()),
                escape(name),
                name_attr = escape_attr(name),
            ));
        }
        html.push_str("</div>");

        // Breadcrumb
        let package = ctx.identity.package(ctx.portfolio.code.package.as_deref());
        html.push_str(r#"<div class="breadcrumb"><span>src</span>"#);
        for segment in package.split('.') {
            html.push_str(&format!(" › <span>{}</span>", escape(segment)));
        }
        html.push_str(&format!(
            r#" › <span class="current">{}</span></div>"#,
            escape(&active.name)
        ));

        // Code
        let numbers: String = (1..=active.lines)
            .map(|n| format!("<span>{n}</span>"))
            .collect();
        html.push_str(&format!(
            r#"<div class="code-area"><div class="line-numbers">{numbers}</div><pre class="code-content"><code>{}</code></pre></div>"#,
            active.html
        ));
        html.push_str("</div></div></div>");

        Fragment::new(html)
            .bind(Binding::click(".explorer .file", Action::SwitchTab))
            .bind(Binding::click(".editor-tabs .tab", Action::SwitchTab))
            .bind(Binding::click(".tab-close", Action::CloseTab))
            .bind(Binding::click(".folder-name", Action::ToggleFolder))
            .bind(Binding::click(".new-file-btn", Action::NewFile))
            .typing(Typing::lines(CODE_SELECTOR))
            .built()
    }
}

fn active_class(state: &EditorState, name: &str) -> &'static str {
    if state.tabs.is_active(name) { " active" } else { "" }
}

// ============================================================================
// Tests
// ============================================================================
