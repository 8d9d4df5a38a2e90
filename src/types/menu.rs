use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// What the user right-clicked on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenuTarget {
    pub coordinate: Coordinate,
    pub row_id: Option<String>,
    pub field: Option<String>,
}

/// One entry of a context menu. Presentation is up to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenuItem {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
}

impl ContextMenuItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            disabled: false,
        }
    }
}

type ProviderFn = Rc<dyn Fn(&ContextMenuTarget) -> Vec<ContextMenuItem>>;

/// Host callback producing context-menu items for a target cell.
///
/// Two providers are equal only if they wrap the same closure.
#[derive(Clone)]
pub struct ContextMenuProvider(ProviderFn);

impl ContextMenuProvider {
    pub fn new(f: impl Fn(&ContextMenuTarget) -> Vec<ContextMenuItem> + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn items(&self, target: &ContextMenuTarget) -> Vec<ContextMenuItem> {
        (self.0)(target)
    }
}

impl PartialEq for ContextMenuProvider {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ContextMenuProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContextMenuProvider(..)")
    }
}
