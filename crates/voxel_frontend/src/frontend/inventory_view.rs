//! Inventory view - a grid of item slots bound to an inventory
//!
//! Slots share an [`InventoryInteraction`] holding the item carried by the
//! cursor. Views are built in code with [`InventoryBuilder`] or read from
//! layout XML through the readers registered by [`create_readers`].

use std::cell::RefCell;
use std::rc::Rc;

use roxmltree::Node;

use crate::content::{Content, ContentIndices};
use crate::foundation::math::{ceil_div, Vec2, Vec4};
use crate::input::{Modifiers, MouseButton};
use crate::items::{Inventory, ItemIcon, ItemStack};
use crate::render::Batch2D;
use crate::ui::node::{as_node, into_ref, ClickEvent, NodeBase, NodeRef, UiNode};
use crate::ui::widgets::Container;
use crate::ui::xml::{element_children, UiXmlReader, XmlError};

/// Side of one slot in pixels
pub const SLOT_SIZE: f32 = 48.0;

/// Gap between neighbouring slots
pub const SLOT_INTERVAL: f32 = 4.0;

/// Largest slot count a single `slots-grid` element may declare
pub const MAX_GRID_SLOTS: usize = 4096;

/// Called with the clicked stack on shift + left click
pub type ShareFunc = Rc<dyn Fn(&ItemStack)>;

/// Called with the clicked stack and the grabbed stack on right click
pub type RightClickFunc = Rc<dyn Fn(&ItemStack, &mut ItemStack)>;

/// Background of a highlighted or hovered slot
const HOVER_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.2);

/// Color of views built with a background panel
const VIEW_COLOR: Vec4 = Vec4::new(0.122, 0.122, 0.122, 0.878);

/// Placement and behaviour of one slot
#[derive(Clone, Default)]
pub struct SlotLayout {
    /// Inventory slot index
    pub index: usize,
    /// Position inside the view
    pub position: Vec2,
    /// Whether the slot sits on a background panel
    pub background: bool,
    /// Item sources hand out copies instead of moving items
    pub item_source: bool,
    /// Shift + left click handler
    pub share_func: Option<ShareFunc>,
    /// Right click handler replacing the default behaviour
    pub right_click: Option<RightClickFunc>,
}

impl SlotLayout {
    /// Layout without click handlers
    pub fn new(index: usize, position: Vec2, background: bool, item_source: bool) -> Self {
        Self {
            index,
            position,
            background,
            item_source,
            share_func: None,
            right_click: None,
        }
    }

    /// Builder: set the shift + left click handler
    pub fn with_share_func(mut self, share_func: impl Fn(&ItemStack) + 'static) -> Self {
        self.share_func = Some(Rc::new(share_func));
        self
    }

    /// Builder: set the right click handler
    pub fn with_right_click(mut self, right_click: impl Fn(&ItemStack, &mut ItemStack) + 'static) -> Self {
        self.right_click = Some(Rc::new(right_click));
        self
    }
}

impl std::fmt::Debug for SlotLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotLayout")
            .field("index", &self.index)
            .field("position", &self.position)
            .field("background", &self.background)
            .field("item_source", &self.item_source)
            .field("share_func", &self.share_func.is_some())
            .field("right_click", &self.right_click.is_some())
            .finish()
    }
}

/// State shared by every slot of the HUD: the item held by the cursor
#[derive(Debug, Default)]
pub struct InventoryInteraction {
    grabbed: ItemStack,
}

impl InventoryInteraction {
    /// Empty-handed interaction
    pub fn new() -> Self {
        Self::default()
    }

    /// Item held by the cursor
    pub fn grabbed(&self) -> &ItemStack {
        &self.grabbed
    }

    /// Item held by the cursor, mutable
    pub fn grabbed_mut(&mut self) -> &mut ItemStack {
        &mut self.grabbed
    }
}

enum SlotSource {
    Slot { inventory: Rc<RefCell<Inventory>>, index: usize },
    Grabbed,
}

struct SlotBinding {
    source: SlotSource,
    content: Rc<Content>,
    interaction: Rc<RefCell<InventoryInteraction>>,
}

/// One item slot
pub struct SlotView {
    base: NodeBase,
    layout: SlotLayout,
    binding: Option<SlotBinding>,
    highlighted: bool,
}

impl SlotView {
    /// Unbound slot placed according to `layout`
    pub fn new(layout: SlotLayout) -> Self {
        let mut base = NodeBase::new(Vec2::new(SLOT_SIZE, SLOT_SIZE));
        base.coord = layout.position;
        base.color = Vec4::new(0.0, 0.0, 0.0, 0.2);
        base.resizable = false;
        Self {
            base,
            layout,
            binding: None,
            highlighted: false,
        }
    }

    /// Layout the slot was created from
    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    /// Show the stack of `inventory` at `index`
    pub fn bind(
        &mut self,
        inventory: Rc<RefCell<Inventory>>,
        index: usize,
        content: Rc<Content>,
        interaction: Rc<RefCell<InventoryInteraction>>,
    ) {
        self.binding = Some(SlotBinding {
            source: SlotSource::Slot { inventory, index },
            content,
            interaction,
        });
    }

    /// Show the stack carried by the cursor
    pub fn bind_grabbed(&mut self, content: Rc<Content>, interaction: Rc<RefCell<InventoryInteraction>>) {
        self.binding = Some(SlotBinding {
            source: SlotSource::Grabbed,
            content,
            interaction,
        });
    }

    /// Whether the slot shows a stack
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Copy of the displayed stack, `None` when unbound or out of range
    pub fn stack(&self) -> Option<ItemStack> {
        let binding = self.binding.as_ref()?;
        match &binding.source {
            SlotSource::Slot { inventory, index } => inventory.borrow().slot(*index).copied(),
            SlotSource::Grabbed => Some(*binding.interaction.borrow().grabbed()),
        }
    }

    /// Whether the slot is drawn as selected
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Mark the slot as selected
    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    fn left_click(&self, binding: &SlotBinding, inventory: &Rc<RefCell<Inventory>>, index: usize, modifiers: Modifiers) {
        if modifiers.contains(Modifiers::SHIFT) {
            let stack = inventory.borrow().slot(index).copied();
            if let (Some(share), Some(stack)) = (&self.layout.share_func, stack) {
                share(&stack);
            }
            return;
        }
        let indices = binding.content.indices();
        let mut interaction = binding.interaction.borrow_mut();
        let grabbed = interaction.grabbed_mut();
        let mut inventory = inventory.borrow_mut();
        let Some(stack) = inventory.slot_mut(index) else {
            return;
        };
        if !self.layout.item_source && stack.accepts(grabbed) {
            stack.move_from(grabbed, indices);
        } else if self.layout.item_source {
            if grabbed.is_empty() {
                grabbed.set(*stack);
            } else {
                grabbed.clear();
            }
        } else {
            std::mem::swap(stack, grabbed);
        }
    }

    fn right_click(&self, binding: &SlotBinding, inventory: &Rc<RefCell<Inventory>>, index: usize) {
        let mut interaction = binding.interaction.borrow_mut();
        if let Some(right_click) = &self.layout.right_click {
            let stack = inventory.borrow().slot(index).copied();
            if let Some(stack) = stack {
                right_click(&stack, interaction.grabbed_mut());
            }
            return;
        }
        if self.layout.item_source {
            return;
        }
        let grabbed = interaction.grabbed_mut();
        let mut inventory = inventory.borrow_mut();
        let Some(stack) = inventory.slot_mut(index) else {
            return;
        };
        if grabbed.is_empty() {
            if !stack.is_empty() {
                let half = stack.count() / 2;
                grabbed.set(*stack);
                grabbed.set_count(stack.count() - half);
                stack.set_count(half);
            }
        } else if stack.is_empty() {
            stack.set(*grabbed);
            stack.set_count(1);
            grabbed.set_count(grabbed.count() - 1);
        } else if stack.accepts(grabbed) && has_room(stack, binding.content.indices()) {
            stack.set_count(stack.count() + 1);
            grabbed.set_count(grabbed.count() - 1);
        }
    }
}

fn has_room(stack: &ItemStack, indices: &ContentIndices) -> bool {
    indices
        .item_def(stack.item_id())
        .is_some_and(|def| stack.count() < def.stack_size)
}

impl UiNode for SlotView {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn clicked(&mut self, event: &ClickEvent) {
        let Some(binding) = &self.binding else {
            return;
        };
        let SlotSource::Slot { inventory, index } = &binding.source else {
            return;
        };
        match event.button {
            MouseButton::Left => self.left_click(binding, inventory, *index, event.modifiers),
            MouseButton::Right => self.right_click(binding, inventory, *index),
            MouseButton::Middle => {}
        }
    }

    fn draw(&self, pos: Vec2, batch: &mut Batch2D) {
        let Some(binding) = &self.binding else {
            return;
        };
        let Some(stack) = self.stack() else {
            return;
        };

        let mut tint = Vec4::new(1.0, 1.0, 1.0, 1.0);
        let mut color = self.base.color;
        if self.base.hover || self.highlighted {
            tint *= 1.333;
            color = HOVER_COLOR;
        }
        if color.w > 0.0 {
            batch.set_color(color);
            if self.highlighted {
                batch.rect(pos - Vec2::new(4.0, 4.0), Vec2::new(SLOT_SIZE + 8.0, SLOT_SIZE + 8.0));
            } else {
                batch.rect(pos, Vec2::new(SLOT_SIZE, SLOT_SIZE));
            }
        }

        if stack.is_empty() {
            return;
        }
        let icon = binding
            .content
            .indices()
            .item_def(stack.item_id())
            .map_or(ItemIcon::None, |def| def.icon.clone());
        match icon {
            ItemIcon::None => {}
            ItemIcon::Block(_) => batch.icon(pos, Vec2::new(SLOT_SIZE, SLOT_SIZE), icon, tint),
            ItemIcon::Sprite(_) => batch.icon(
                pos + Vec2::new(8.0, 8.0),
                Vec2::new(SLOT_SIZE - 16.0, SLOT_SIZE - 16.0),
                icon,
                tint,
            ),
        }

        if stack.count() > 1 {
            let text = stack.count().to_string();
            let text_pos = pos + Vec2::new(SLOT_SIZE - text.len() as f32 * 8.0, SLOT_SIZE - 16.0);
            batch.set_color(Vec4::new(0.0, 0.0, 0.0, 1.0));
            batch.text(text_pos + Vec2::new(1.0, 1.0), text.clone());
            batch.set_color(Vec4::new(1.0, 1.0, 1.0, 1.0));
            batch.text(text_pos, text);
        }
    }
}

/// Container of slot views bound to one inventory
pub struct InventoryView {
    container: Container,
    slots: Vec<Rc<RefCell<SlotView>>>,
    inventory: Option<Rc<RefCell<Inventory>>>,
}

impl InventoryView {
    /// Empty view
    pub fn new() -> Self {
        Self {
            container: Container::new(Vec2::zeros(), Vec2::zeros()),
            slots: Vec::new(),
            inventory: None,
        }
    }

    /// Add a slot built from `layout`
    pub fn add_slot(&mut self, layout: SlotLayout) -> Rc<RefCell<SlotView>> {
        let slot = into_ref(SlotView::new(layout));
        self.container.add(as_node(&slot));
        self.slots.push(Rc::clone(&slot));
        slot
    }

    /// Add a decoration node (background panels, labels)
    pub fn add(&mut self, node: NodeRef) {
        self.container.add(node);
    }

    /// Slot views in creation order
    pub fn slots(&self) -> &[Rc<RefCell<SlotView>>] {
        &self.slots
    }

    /// Bound inventory
    pub fn inventory(&self) -> Option<Rc<RefCell<Inventory>>> {
        self.inventory.clone()
    }

    /// Bind every slot to its index in `inventory`
    pub fn bind(
        &mut self,
        inventory: Rc<RefCell<Inventory>>,
        content: Rc<Content>,
        interaction: Rc<RefCell<InventoryInteraction>>,
    ) {
        let size = inventory.borrow().size();
        for slot in &self.slots {
            let mut slot = slot.borrow_mut();
            let index = slot.layout().index;
            if index >= size {
                log::warn!("Slot index {} out of inventory {} bounds ({})", index, inventory.borrow().id(), size);
                continue;
            }
            slot.bind(Rc::clone(&inventory), index, Rc::clone(&content), Rc::clone(&interaction));
        }
        self.inventory = Some(inventory);
    }

    /// Highlight the slot showing inventory index `index`
    pub fn set_selected(&mut self, index: usize) {
        for slot in &self.slots {
            let mut slot = slot.borrow_mut();
            let selected = slot.layout().index == index;
            slot.set_highlighted(selected);
        }
    }
}

impl Default for InventoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl UiNode for InventoryView {
    fn base(&self) -> &NodeBase {
        self.container.base()
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        self.container.base_mut()
    }

    fn children(&self) -> Option<&[NodeRef]> {
        self.container.children()
    }

    fn content_offset(&self) -> Vec2 {
        self.container.content_offset()
    }

    fn act(&mut self, delta: f32) {
        self.container.act(delta);
    }

    fn draw(&self, pos: Vec2, batch: &mut Batch2D) {
        self.container.draw(pos, batch);
    }

    fn scrolled(&mut self, delta: i32) -> bool {
        self.container.scrolled(delta)
    }
}

/// Assembles an [`InventoryView`]
pub struct InventoryBuilder {
    view: InventoryView,
}

impl InventoryBuilder {
    /// Builder for an empty view
    pub fn new() -> Self {
        Self {
            view: InventoryView::new(),
        }
    }

    /// Add `count` slots in rows of `cols`, indices starting at zero
    ///
    /// The view grows to contain the grid. With `add_panel` a background
    /// container is placed under the grid and the view gets a solid color.
    pub fn add_grid(
        &mut self,
        cols: usize,
        count: usize,
        coord: Vec2,
        padding: f32,
        add_panel: bool,
        layout: SlotLayout,
    ) -> &mut Self {
        if cols == 0 {
            log::warn!("Ignoring inventory grid of {} slots with zero columns", count);
            return self;
        }
        let rows = ceil_div(count, cols);
        let step = SLOT_SIZE + SLOT_INTERVAL;
        let width = cols as f32 * step - SLOT_INTERVAL + padding * 2.0;
        let height = rows as f32 * step - SLOT_INTERVAL + padding * 2.0;

        let mut size = self.view.size();
        size.x = size.x.max(coord.x + width);
        size.y = size.y.max(coord.y + height);
        self.view.set_size(size);

        if add_panel {
            self.view.set_color(VIEW_COLOR);
            self.view.add(into_ref(Container::new(coord, Vec2::new(width, height))));
        }

        for index in 0..count {
            let (row, col) = (index / cols, index % cols);
            let mut slot = layout.clone();
            slot.index = index;
            slot.position = Vec2::new(col as f32 * step + padding, row as f32 * step + padding);
            self.view.add_slot(slot);
        }
        self
    }

    /// Add a single slot
    pub fn add(&mut self, layout: SlotLayout) -> &mut Self {
        self.view.add_slot(layout);
        self
    }

    /// Finish the view
    pub fn build(self) -> InventoryView {
        self.view
    }
}

impl Default for InventoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Register the `inventory` tag (with its `slot` and `slots-grid` children)
pub fn create_readers(reader: &mut UiXmlReader) {
    reader.add_reader("inventory", read_inventory);
}

fn read_inventory(reader: &UiXmlReader, node: Node<'_, '_>) -> Result<NodeRef, XmlError> {
    let mut view = InventoryView::new();
    view.set_color(VIEW_COLOR);
    reader.read_base_attrs(node, &mut view)?;

    for child in element_children(node) {
        match child.tag_name().name() {
            "slot" => read_slot(reader, child, &mut view)?,
            "slots-grid" => read_slots_grid(reader, child, &mut view)?,
            _ => view.add(reader.read_node(child)?),
        }
    }

    if node.attribute("size").is_none() {
        let extent = view.children().unwrap_or_default().iter().fold(Vec2::zeros(), |extent, child| {
            let child = child.borrow();
            extent.sup(&(child.coord() + child.size()))
        });
        view.set_size(extent + Vec2::new(SLOT_INTERVAL, SLOT_INTERVAL));
    }
    Ok(into_ref(view))
}

fn read_slot(reader: &UiXmlReader, node: Node<'_, '_>, view: &mut InventoryView) -> Result<(), XmlError> {
    let index = reader.attr(node, "index")?.unwrap_or(0);
    let item_source = reader.attr(node, "item-source")?.unwrap_or(false);
    let position = reader
        .attr_vec2(node, "coord")?
        .or(reader.attr_vec2(node, "pos")?)
        .unwrap_or_else(Vec2::zeros);
    let slot = view.add_slot(SlotLayout::new(index, position, true, item_source));
    reader.read_base_attrs(node, &mut *slot.borrow_mut())?;
    Ok(())
}

fn read_slots_grid(reader: &UiXmlReader, node: Node<'_, '_>, view: &mut InventoryView) -> Result<(), XmlError> {
    let start_index: usize = reader.attr(node, "start-index")?.unwrap_or(0);
    let rows: Option<usize> = reader.attr(node, "rows")?;
    let cols: Option<usize> = reader.attr(node, "cols")?;
    let count: Option<usize> = reader.attr(node, "count")?;
    let interval: f32 = reader.attr(node, "interval")?.unwrap_or(SLOT_INTERVAL);
    let padding: f32 = reader.attr(node, "padding")?.unwrap_or(interval);
    let item_source = reader.attr(node, "item-source")?.unwrap_or(false);
    let pos = reader.attr_vec2(node, "pos")?.unwrap_or_else(Vec2::zeros);

    let (rows, cols, count) = match (rows, cols, count) {
        (Some(rows), Some(cols), Some(count)) => (rows, cols, count),
        (Some(rows), Some(cols), None) => {
            let Some(count) = rows.checked_mul(cols) else {
                return Err(reader.invalid(node, "rows", node.attribute("rows").unwrap_or_default()));
            };
            (rows, cols, count)
        }
        (None, Some(cols), Some(count)) => (ceil_div(count, cols), cols, count),
        (Some(rows), None, Some(count)) => (rows, ceil_div(count, rows), count),
        _ => {
            let value = node.attribute("count").unwrap_or_default();
            return Err(reader.invalid(node, "count", value));
        }
    };
    if cols == 0 {
        return Err(reader.invalid(node, "cols", "0"));
    }
    if count > MAX_GRID_SLOTS {
        return Err(reader.invalid(node, "count", &count.to_string()));
    }
    if start_index.checked_add(count).is_none() {
        return Err(reader.invalid(node, "start-index", &start_index.to_string()));
    }

    let step = SLOT_SIZE + interval;
    for row in 0..rows {
        for col in 0..cols {
            let offset = row * cols + col;
            if offset >= count {
                return Ok(());
            }
            let position = pos + Vec2::new(col as f32 * step + padding, row as f32 * step + padding);
            view.add_slot(SlotLayout::new(start_index + offset, position, true, item_source));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemDef, ItemId};
    use crate::ui::node::downcast_node;

    struct Fixture {
        content: Rc<Content>,
        inventory: Rc<RefCell<Inventory>>,
        interaction: Rc<RefCell<InventoryInteraction>>,
    }

    fn fixture() -> Fixture {
        let indices = ContentIndices::new(
            vec![
                ItemDef::new("base:stone").with_icon(ItemIcon::Block("base:stone".into())),
                ItemDef::new("base:pickaxe")
                    .with_stack_size(1)
                    .with_icon(ItemIcon::Sprite("items:pickaxe".into())),
            ],
            Vec::new(),
        );
        Fixture {
            content: Rc::new(Content::new(indices)),
            inventory: Rc::new(RefCell::new(Inventory::new(1, 4))),
            interaction: Rc::new(RefCell::new(InventoryInteraction::new())),
        }
    }

    fn slot(fx: &Fixture, layout: SlotLayout) -> SlotView {
        let index = layout.index;
        let mut slot = SlotView::new(layout);
        slot.bind(Rc::clone(&fx.inventory), index, Rc::clone(&fx.content), Rc::clone(&fx.interaction));
        slot
    }

    fn click(slot: &mut SlotView, button: MouseButton, modifiers: Modifiers) {
        slot.clicked(&ClickEvent {
            button,
            local: Vec2::new(1.0, 1.0),
            modifiers,
        });
    }

    fn put(fx: &Fixture, index: usize, item: u32, count: u32) {
        fx.inventory.borrow_mut().slot_mut(index).unwrap().set(ItemStack::new(ItemId(item), count));
    }

    fn grabbed(fx: &Fixture) -> ItemStack {
        *fx.interaction.borrow().grabbed()
    }

    fn at(fx: &Fixture, index: usize) -> ItemStack {
        *fx.inventory.borrow().slot(index).unwrap()
    }

    #[test]
    fn test_left_click_picks_up_and_drops() {
        let fx = fixture();
        put(&fx, 0, 1, 10);
        let mut first = slot(&fx, SlotLayout::new(0, Vec2::zeros(), false, false));
        let mut second = slot(&fx, SlotLayout::new(1, Vec2::zeros(), false, false));

        click(&mut first, MouseButton::Left, Modifiers::empty());
        assert_eq!(grabbed(&fx), ItemStack::new(ItemId(1), 10));
        assert!(at(&fx, 0).is_empty());

        click(&mut second, MouseButton::Left, Modifiers::empty());
        assert!(grabbed(&fx).is_empty());
        assert_eq!(at(&fx, 1), ItemStack::new(ItemId(1), 10));
    }

    #[test]
    fn test_left_click_merges_up_to_stack_size() {
        let fx = fixture();
        put(&fx, 0, 1, 60);
        fx.interaction.borrow_mut().grabbed_mut().set(ItemStack::new(ItemId(1), 10));
        let mut view = slot(&fx, SlotLayout::new(0, Vec2::zeros(), false, false));
        click(&mut view, MouseButton::Left, Modifiers::empty());
        assert_eq!(at(&fx, 0).count(), 64);
        assert_eq!(grabbed(&fx).count(), 6);
    }

    #[test]
    fn test_left_click_swaps_different_items() {
        let fx = fixture();
        put(&fx, 0, 1, 5);
        fx.interaction.borrow_mut().grabbed_mut().set(ItemStack::new(ItemId(2), 1));
        let mut view = slot(&fx, SlotLayout::new(0, Vec2::zeros(), false, false));
        click(&mut view, MouseButton::Left, Modifiers::empty());
        assert_eq!(at(&fx, 0), ItemStack::new(ItemId(2), 1));
        assert_eq!(grabbed(&fx), ItemStack::new(ItemId(1), 5));
    }

    #[test]
    fn test_item_source_hands_out_copies() {
        let fx = fixture();
        put(&fx, 0, 2, 1);
        let mut source = slot(&fx, SlotLayout::new(0, Vec2::zeros(), false, true));
        click(&mut source, MouseButton::Left, Modifiers::empty());
        assert_eq!(grabbed(&fx), ItemStack::new(ItemId(2), 1));
        assert_eq!(at(&fx, 0), ItemStack::new(ItemId(2), 1));
        click(&mut source, MouseButton::Left, Modifiers::empty());
        assert!(grabbed(&fx).is_empty());

        click(&mut source, MouseButton::Right, Modifiers::empty());
        assert!(grabbed(&fx).is_empty());
    }

    #[test]
    fn test_shift_click_shares_without_moving() {
        let fx = fixture();
        put(&fx, 2, 1, 3);
        let shared = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&shared);
        let layout =
            SlotLayout::new(2, Vec2::zeros(), false, false).with_share_func(move |stack| sink.borrow_mut().push(*stack));
        let mut view = slot(&fx, layout);
        click(&mut view, MouseButton::Left, Modifiers::SHIFT);
        assert_eq!(shared.borrow().as_slice(), [ItemStack::new(ItemId(1), 3)]);
        assert!(grabbed(&fx).is_empty());
        assert_eq!(at(&fx, 2).count(), 3);
    }

    #[test]
    fn test_right_click_splits_and_places_one() {
        let fx = fixture();
        put(&fx, 0, 1, 5);
        let mut first = slot(&fx, SlotLayout::new(0, Vec2::zeros(), false, false));
        let mut second = slot(&fx, SlotLayout::new(1, Vec2::zeros(), false, false));

        click(&mut first, MouseButton::Right, Modifiers::empty());
        assert_eq!(grabbed(&fx).count(), 3);
        assert_eq!(at(&fx, 0).count(), 2);

        click(&mut second, MouseButton::Right, Modifiers::empty());
        assert_eq!(at(&fx, 1), ItemStack::new(ItemId(1), 1));
        assert_eq!(grabbed(&fx).count(), 2);

        click(&mut first, MouseButton::Right, Modifiers::empty());
        assert_eq!(at(&fx, 0).count(), 3);
        assert_eq!(grabbed(&fx).count(), 1);
    }

    #[test]
    fn test_right_click_handler_overrides_default() {
        let fx = fixture();
        put(&fx, 0, 1, 5);
        let layout = SlotLayout::new(0, Vec2::zeros(), false, false)
            .with_right_click(|stack, grabbed| grabbed.set(ItemStack::new(stack.item_id(), 1)));
        let mut view = slot(&fx, layout);
        click(&mut view, MouseButton::Right, Modifiers::empty());
        assert_eq!(grabbed(&fx), ItemStack::new(ItemId(1), 1));
        assert_eq!(at(&fx, 0).count(), 5);
    }

    #[test]
    fn test_unbound_slot_ignores_input_and_draws_nothing() {
        let mut view = SlotView::new(SlotLayout::default());
        click(&mut view, MouseButton::Left, Modifiers::empty());
        let mut batch = Batch2D::new();
        view.draw(Vec2::zeros(), &mut batch);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_draw_highlighted_slot_with_count() {
        let fx = fixture();
        put(&fx, 0, 1, 12);
        let mut view = slot(&fx, SlotLayout::new(0, Vec2::zeros(), false, false));
        view.set_highlighted(true);
        let mut batch = Batch2D::new();
        view.draw(Vec2::new(100.0, 100.0), &mut batch);

        let commands = batch.commands();
        assert!(matches!(
            commands[0],
            crate::render::DrawCommand::Rect { pos, size, color }
                if pos == Vec2::new(96.0, 96.0) && size == Vec2::new(56.0, 56.0) && color == HOVER_COLOR
        ));
        assert!(matches!(commands[1], crate::render::DrawCommand::ItemIcon { .. }));
        let texts: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                crate::render::DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["12", "12"]);
    }

    #[test]
    fn test_builder_grid_geometry() {
        let mut builder = InventoryBuilder::new();
        builder.add_grid(4, 10, Vec2::zeros(), 8.0, true, SlotLayout::default());
        let view = builder.build();

        // 4 columns * 52 - 4 + 16, 3 rows * 52 - 4 + 16
        assert_eq!(view.size(), Vec2::new(220.0, 168.0));
        assert_eq!(view.color(), VIEW_COLOR);
        assert_eq!(view.slots().len(), 10);
        let last = view.slots()[9].borrow();
        assert_eq!(last.layout().index, 9);
        assert_eq!(last.coord(), Vec2::new(60.0, 112.0));
        assert_eq!(view.children().unwrap().len(), 11);
    }

    #[test]
    fn test_bind_and_select() {
        let fx = fixture();
        let mut builder = InventoryBuilder::new();
        builder.add_grid(3, 6, Vec2::zeros(), 4.0, false, SlotLayout::default());
        let mut view = builder.build();
        view.bind(Rc::clone(&fx.inventory), Rc::clone(&fx.content), Rc::clone(&fx.interaction));

        // the inventory only has 4 slots
        let bound = view.slots().iter().filter(|s| s.borrow().is_bound()).count();
        assert_eq!(bound, 4);
        view.set_selected(2);
        assert!(view.slots()[2].borrow().is_highlighted());
        assert!(!view.slots()[1].borrow().is_highlighted());
        assert!(view.inventory().is_some());
    }

    #[test]
    fn test_reads_inventory_layout() {
        let mut reader = UiXmlReader::without_scripting(0);
        create_readers(&mut reader);
        let root = reader
            .read_str(
                "inventory.xml",
                r#"<inventory id="inv" color="0,0,0,0.5">
                    <slots-grid rows="1" count="3" start-index="5" pos="0,10"/>
                    <slot index="0" coord="200,10" item-source="true"/>
                </inventory>"#,
            )
            .unwrap();
        let layouts = downcast_node::<InventoryView, _>(&root, |view| {
            view.slots()
                .iter()
                .map(|slot| {
                    let slot = slot.borrow();
                    (slot.layout().index, slot.coord(), slot.layout().item_source)
                })
                .collect::<Vec<_>>()
        })
        .unwrap();
        assert_eq!(
            layouts,
            [
                (5, Vec2::new(4.0, 14.0), false),
                (6, Vec2::new(56.0, 14.0), false),
                (7, Vec2::new(108.0, 14.0), false),
                (0, Vec2::new(200.0, 10.0), true),
            ]
        );
        assert_eq!(root.borrow().size(), Vec2::new(252.0, 66.0));
        assert_eq!(root.borrow().color(), Vec4::new(0.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn test_slots_grid_needs_two_dimensions() {
        let mut reader = UiXmlReader::without_scripting(0);
        create_readers(&mut reader);
        let err = reader
            .read_str("inventory.xml", r#"<inventory><slots-grid cols="3"/></inventory>"#)
            .err()
            .expect("grid with one dimension accepted");
        assert!(matches!(err, XmlError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_slots_grid_rejects_out_of_range_sizes() {
        let mut reader = UiXmlReader::without_scripting(0);
        create_readers(&mut reader);
        let rejected = [
            (r#"<slots-grid rows="18446744073709551615" cols="2"/>"#, "rows"),
            (r#"<slots-grid start-index="18446744073709551615" cols="2" count="2"/>"#, "start-index"),
            (r#"<slots-grid rows="1000000000" cols="1"/>"#, "count"),
            (r#"<slots-grid rows="2" cols="18446744073709551615" count="5000"/>"#, "count"),
        ];
        for (grid, attribute) in rejected {
            let result = reader.read_str("inventory.xml", &format!("<inventory>{grid}</inventory>"));
            assert!(
                matches!(result, Err(XmlError::InvalidAttribute { ref name, .. }) if name == attribute),
                "{grid} should fail on {attribute}"
            );
        }

        // a huge row count is fine while the slot count stays small
        let root = reader
            .read_str(
                "inventory.xml",
                r#"<inventory><slots-grid rows="18446744073709551615" cols="2" count="1"/></inventory>"#,
            )
            .unwrap();
        assert_eq!(downcast_node::<InventoryView, _>(&root, |view| view.slots().len()), Some(1));
    }

    #[test]
    fn test_builder_ignores_zero_columns() {
        let mut builder = InventoryBuilder::new();
        builder.add_grid(0, 4, Vec2::zeros(), 4.0, true, SlotLayout::default());
        let view = builder.build();
        assert!(view.slots().is_empty());
        assert_eq!(view.size(), Vec2::zeros());
    }
}
