use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default column width in pixels when neither the column nor the defaults set one.
pub const DEFAULT_COLUMN_WIDTH: u32 = 120;

/// Edge a column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPinned {
    Left,
    Right,
}

type ValueFn = Rc<dyn Fn(&Value) -> Value>;

/// Converts a raw cell value to its display form (`format`) and an edited
/// value back to its raw form (`parse`). Either half may be absent.
#[derive(Clone, Default)]
pub struct Transformer {
    format: Option<ValueFn>,
    parse: Option<ValueFn>,
}

impl Transformer {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_format(mut self, f: impl Fn(&Value) -> Value + 'static) -> Self {
        self.format = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn with_parse(mut self, f: impl Fn(&Value) -> Value + 'static) -> Self {
        self.parse = Some(Rc::new(f));
        self
    }

    /// Raw → display. Passes the value through when no formatter is set.
    pub fn format(&self, value: &Value) -> Value {
        match &self.format {
            Some(f) => f(value),
            None => value.clone(),
        }
    }

    /// Display → raw. Passes the value through when no parser is set.
    pub fn parse(&self, value: &Value) -> Value {
        match &self.parse {
            Some(f) => f(value),
            None => value.clone(),
        }
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("format", &self.format.is_some())
            .field("parse", &self.parse.is_some())
            .finish()
    }
}

impl PartialEq for Transformer {
    fn eq(&self, other: &Self) -> bool {
        fn same(a: &Option<ValueFn>, b: &Option<ValueFn>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }
        same(&self.format, &other.format) && same(&self.parse, &other.parse)
    }
}

/// A leaf column as declared by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<ColumnPinned>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resizable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
    #[serde(skip)]
    pub transformer: Option<Transformer>,
}

impl ColumnDef {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>) -> Self {
        self.header_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn pinned(mut self, pinned: ColumnPinned) -> Self {
        self.pinned = Some(pinned);
        self
    }

    #[must_use]
    pub fn transformer(mut self, transformer: Transformer) -> Self {
        self.transformer = Some(transformer);
        self
    }
}

/// A group header with nested columns or groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnGroupDef {
    pub group_id: String,
    #[serde(default)]
    pub header_name: String,
    #[serde(default)]
    pub collapsed: bool,
    pub children: Vec<ColumnNode>,
}

impl ColumnGroupDef {
    pub fn new(group_id: impl Into<String>, children: Vec<ColumnNode>) -> Self {
        Self {
            group_id: group_id.into(),
            header_name: String::new(),
            collapsed: false,
            children,
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>) -> Self {
        self.header_name = name.into();
        self
    }

    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }
}

/// A node of the column definition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnNode {
    Group(ColumnGroupDef),
    Column(ColumnDef),
}

impl From<ColumnDef> for ColumnNode {
    fn from(def: ColumnDef) -> Self {
        ColumnNode::Column(def)
    }
}

impl From<ColumnGroupDef> for ColumnNode {
    fn from(def: ColumnGroupDef) -> Self {
        ColumnNode::Group(def)
    }
}

/// Options applied to every column unless the column sets its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<ColumnPinned>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resizable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
    #[serde(skip)]
    pub transformer: Option<Transformer>,
}

/// A column after defaults are merged in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnOptions {
    pub field: String,
    pub header_name: String,
    pub width: u32,
    pub pinned: Option<ColumnPinned>,
    pub resizable: bool,
    pub editable: bool,
    pub visible: bool,
    #[serde(skip)]
    pub transformer: Option<Transformer>,
}

impl ColumnOptions {
    /// Merge `defaults` under `def`: anything the column sets explicitly wins.
    pub fn resolve(def: &ColumnDef, defaults: &ColumnDefaults) -> Self {
        Self {
            field: def.field.clone(),
            header_name: def.header_name.clone().unwrap_or_else(|| def.field.clone()),
            width: def.width.or(defaults.width).unwrap_or(DEFAULT_COLUMN_WIDTH),
            pinned: def.pinned.or(defaults.pinned),
            resizable: def.resizable.or(defaults.resizable).unwrap_or(true),
            editable: def.editable.or(defaults.editable).unwrap_or(true),
            visible: true,
            transformer: def
                .transformer
                .clone()
                .or_else(|| defaults.transformer.clone()),
        }
    }
}

/// Flattened metadata for one column group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupData {
    pub header_name: String,
    /// Descendant leaf fields in declaration order.
    pub columns: Vec<String>,
    /// Descendant group ids, depth-first.
    pub groups: Vec<String>,
    pub collapsed: bool,
    /// Inserted to even out tree depth, not declared by the host.
    pub padding: bool,
}
