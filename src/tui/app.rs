//! Application state for the TUI.

use crate::controller::ResourceController;
use crate::models::{Form, Labels, Order, Product, Resource, Stock, Supplier};

use super::event::{Action, Routed};
use super::input::FieldCursor;

/// Number of resource tabs.
pub const TAB_COUNT: usize = 4;

/// Central application state container.
pub struct App<A> {
    // -- Resource State --
    pub products: ResourceController<Product, A>,
    pub suppliers: ResourceController<Supplier, A>,
    pub stock: ResourceController<Stock, A>,
    pub orders: ResourceController<Order, A>,

    // -- Tab State --
    /// Index of the currently active tab in [`Tab::ALL`].
    pub active_tab: usize,
    /// Selected table row per tab.
    pub selected: [usize; TAB_COUNT],

    // -- UI State --
    /// Current input mode.
    pub mode: Mode,
    /// Form field receiving input.
    pub field_index: usize,
    /// Cursor within the focused field.
    pub cursor: FieldCursor,
    /// API base URL shown in the status bar.
    pub api_url: String,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl<A: Clone> App<A> {
    /// Creates the application with one controller per resource.
    pub fn new(api: A, api_url: impl Into<String>) -> Self {
        Self {
            products: ResourceController::new(api.clone()),
            suppliers: ResourceController::new(api.clone()),
            stock: ResourceController::new(api.clone()),
            orders: ResourceController::new(api),

            active_tab: 0,
            selected: [0; TAB_COUNT],

            mode: Mode::Normal,
            field_index: 0,
            cursor: FieldCursor::default(),
            api_url: api_url.into(),

            should_quit: false,
        }
    }
}

impl<A> App<A> {
    /// Returns the currently active tab.
    pub fn current_tab(&self) -> Tab {
        Tab::ALL[self.active_tab]
    }

    /// Switches to the next tab.
    pub fn next_tab(&mut self) {
        self.active_tab = (self.active_tab + 1) % Tab::ALL.len();
        self.reset_focus();
    }

    /// Switches to the previous tab.
    pub fn previous_tab(&mut self) {
        self.active_tab = self
            .active_tab
            .checked_sub(1)
            .unwrap_or(Tab::ALL.len() - 1);
        self.reset_focus();
    }

    /// Returns the screen behind a tab.
    pub fn screen_for(&self, tab: Tab) -> &dyn Screen {
        match tab {
            Tab::Products => &self.products,
            Tab::Suppliers => &self.suppliers,
            Tab::Stock => &self.stock,
            Tab::Orders => &self.orders,
        }
    }

    /// Returns the active screen.
    pub fn screen(&self) -> &dyn Screen {
        self.screen_for(self.current_tab())
    }

    /// Returns the active screen for mutation.
    pub fn screen_mut(&mut self) -> &mut dyn Screen {
        match self.current_tab() {
            Tab::Products => &mut self.products,
            Tab::Suppliers => &mut self.suppliers,
            Tab::Stock => &mut self.stock,
            Tab::Orders => &mut self.orders,
        }
    }

    /// Reload requests for every resource, issued once at start-up.
    pub fn initial_loads(&mut self) -> Vec<Action> {
        vec![
            self.products.reload(),
            self.suppliers.reload(),
            self.stock.reload(),
            self.orders.reload(),
        ]
    }

    /// Selected row of the active tab, clamped to the current list.
    pub fn selected_row(&self) -> Option<usize> {
        let count = self.screen().row_count();
        (count > 0).then(|| self.selected[self.active_tab].min(count - 1))
    }

    /// Moves the row selection down.
    pub fn select_next(&mut self) {
        if let Some(row) = self.selected_row() {
            let last = self.screen().row_count() - 1;
            self.selected[self.active_tab] = (row + 1).min(last);
        }
    }

    /// Moves the row selection up.
    pub fn select_previous(&mut self) {
        if let Some(row) = self.selected_row() {
            self.selected[self.active_tab] = row.saturating_sub(1);
        }
    }

    /// Focuses a form field and puts the cursor at its end.
    pub fn focus_field(&mut self, index: usize) {
        let count = self.screen().fields().len();
        if count == 0 {
            return;
        }
        self.field_index = index % count;
        self.cursor = FieldCursor::at_end(self.screen().field(self.field_index));
    }

    /// Focuses the next form field, wrapping around.
    pub fn next_field(&mut self) {
        self.focus_field(self.field_index + 1);
    }

    /// Focuses the previous form field, wrapping around.
    pub fn previous_field(&mut self) {
        let count = self.screen().fields().len();
        self.focus_field(self.field_index + count.saturating_sub(1));
    }

    /// Applies an edit to the focused field at the cursor.
    pub fn edit_field(&mut self, edit: impl FnOnce(&mut FieldCursor, &mut String)) {
        let index = self.field_index;
        let mut cursor = self.cursor;
        if let Some(text) = self.screen_mut().field_mut(index) {
            edit(&mut cursor, text);
        }
        self.cursor = cursor;
    }

    /// Keeps the cursor inside the focused field after its text changed.
    pub fn clamp_cursor(&mut self) {
        let index = self.field_index;
        let mut cursor = self.cursor;
        cursor.clamp(self.screen().field(index));
        self.cursor = cursor;
    }

    fn reset_focus(&mut self) {
        self.mode = Mode::Normal;
        self.focus_field(0);
    }
}

/// Tabs in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Products,
    Suppliers,
    Stock,
    Orders,
}

impl Tab {
    pub const ALL: [Tab; TAB_COUNT] = [Tab::Products, Tab::Suppliers, Tab::Stock, Tab::Orders];

    /// Returns the display title for the tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Products => Product::LABELS.title,
            Tab::Suppliers => Supplier::LABELS.title,
            Tab::Stock => Stock::LABELS.title,
            Tab::Orders => Order::LABELS.title,
        }
    }
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing into the form.
    Insert,
    /// Waiting for a yes/no on deleting the selected row.
    Confirm,
}

/// Type-erased view of a [`ResourceController`] for rendering and input.
pub trait Screen {
    fn labels(&self) -> Labels;
    fn columns(&self) -> &'static [&'static str];
    fn rows(&self) -> Vec<Vec<String>>;
    fn row_count(&self) -> usize;
    fn fields(&self) -> &'static [&'static str];
    fn field(&self, index: usize) -> &str;
    fn field_mut(&mut self, index: usize) -> Option<&mut String>;
    /// Identifier of the row being edited, for display.
    fn editing_label(&self) -> Option<String>;
    fn last_error(&self) -> Option<&str>;
    fn is_busy(&self) -> bool;
    fn is_loading(&self) -> bool;
    /// Loads a row into the form. Returns `false` if nothing changed.
    fn begin_edit_at(&mut self, row: usize) -> bool;
    fn cancel_edit(&mut self);
    fn reload(&mut self) -> Action;
    fn submit(&mut self) -> Option<Action>;
    fn remove_at(&mut self, row: usize) -> Option<Action>;
}

impl<R: Routed, A> Screen for ResourceController<R, A> {
    fn labels(&self) -> Labels {
        R::LABELS
    }

    fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.items().iter().map(R::row).collect()
    }

    fn row_count(&self) -> usize {
        self.items().len()
    }

    fn fields(&self) -> &'static [&'static str] {
        <R::Draft as Form>::FIELDS
    }

    fn field(&self, index: usize) -> &str {
        self.draft().field(index)
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        self.draft_mut().field_mut(index)
    }

    fn editing_label(&self) -> Option<String> {
        self.editing_id().map(ToString::to_string)
    }

    fn last_error(&self) -> Option<&str> {
        ResourceController::last_error(self)
    }

    fn is_busy(&self) -> bool {
        ResourceController::is_busy(self)
    }

    fn is_loading(&self) -> bool {
        ResourceController::is_loading(self)
    }

    fn begin_edit_at(&mut self, row: usize) -> bool {
        match self.items().get(row).cloned() {
            Some(entity) => self.begin_edit(&entity),
            None => false,
        }
    }

    fn cancel_edit(&mut self) {
        ResourceController::cancel_edit(self);
    }

    fn reload(&mut self) -> Action {
        R::action(self.prepare_load())
    }

    fn submit(&mut self) -> Option<Action> {
        self.prepare_submit().map(R::action)
    }

    fn remove_at(&mut self, row: usize) -> Option<Action> {
        let id = self.items().get(row)?.id();
        self.prepare_remove(id).map(R::action)
    }
}
