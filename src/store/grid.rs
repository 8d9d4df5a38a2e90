//! Grid-level display configuration.

use std::rc::Rc;

use super::{Action, Reducer, Store};
use crate::types::{ContextMenuProvider, FillLimit, GridConfig};

#[derive(Debug, Clone)]
pub enum GridAction {
    SetSize { width: u32, height: u32 },
    SetRowHeight(u32),
    SetPreloadCount(u32),
    SetFillMode(Option<FillLimit>),
    SetLoading(bool),
    SetContextMenu(Option<ContextMenuProvider>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridActionKind {
    SetSize,
    SetRowHeight,
    SetPreloadCount,
    SetFillMode,
    SetLoading,
    SetContextMenu,
}

impl Action for GridAction {
    type Kind = GridActionKind;

    fn kind(&self) -> GridActionKind {
        match self {
            GridAction::SetSize { .. } => GridActionKind::SetSize,
            GridAction::SetRowHeight(_) => GridActionKind::SetRowHeight,
            GridAction::SetPreloadCount(_) => GridActionKind::SetPreloadCount,
            GridAction::SetFillMode(_) => GridActionKind::SetFillMode,
            GridAction::SetLoading(_) => GridActionKind::SetLoading,
            GridAction::SetContextMenu(_) => GridActionKind::SetContextMenu,
        }
    }
}

/// Copy-on-write update that keeps the same snapshot when `f` changes nothing.
fn update(state: &Rc<GridConfig>, f: impl FnOnce(&mut GridConfig)) -> Rc<GridConfig> {
    let mut next = GridConfig::clone(state);
    f(&mut next);
    if next == **state {
        Rc::clone(state)
    } else {
        Rc::new(next)
    }
}

impl Reducer for GridConfig {
    type Action = GridAction;

    fn reduce(state: &Rc<Self>, action: &GridAction) -> Rc<Self> {
        match action {
            GridAction::SetSize { width, height } => update(state, |s| {
                s.width = *width;
                s.height = *height;
            }),
            GridAction::SetRowHeight(height) => update(state, |s| s.row_height = (*height).max(1)),
            GridAction::SetPreloadCount(count) => update(state, |s| s.preload_count = *count),
            GridAction::SetFillMode(mode) => update(state, |s| s.fill_mode = *mode),
            GridAction::SetLoading(loading) => update(state, |s| s.loading = *loading),
            GridAction::SetContextMenu(provider) => {
                update(state, |s| s.context_menu = provider.clone())
            }
        }
    }
}

/// Store of [`GridConfig`].
#[derive(Clone)]
pub struct GridStore {
    store: Store<GridConfig>,
}

impl GridStore {
    pub fn new(config: GridConfig) -> Self {
        Self {
            store: Store::new("grid", config),
        }
    }

    pub fn store(&self) -> &Store<GridConfig> {
        &self.store
    }

    pub fn state(&self) -> Rc<GridConfig> {
        self.store.state()
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.store.dispatch(GridAction::SetSize { width, height });
    }

    pub fn set_row_height(&self, height: u32) {
        self.store.dispatch(GridAction::SetRowHeight(height));
    }

    pub fn set_preload_count(&self, count: u32) {
        self.store.dispatch(GridAction::SetPreloadCount(count));
    }

    pub fn set_fill_mode(&self, mode: Option<FillLimit>) {
        self.store.dispatch(GridAction::SetFillMode(mode));
    }

    pub fn set_loading(&self, loading: bool) {
        self.store.dispatch(GridAction::SetLoading(loading));
    }

    pub fn set_context_menu(&self, provider: Option<ContextMenuProvider>) {
        self.store.dispatch(GridAction::SetContextMenu(provider));
    }

    /// Rows that fit the viewport plus the preload margin on both sides.
    pub fn render_row_budget(&self) -> u32 {
        let s = self.state();
        let visible = s.height.div_ceil(s.row_height.max(1));
        visible.saturating_add(s.preload_count.saturating_mul(2))
    }
}
