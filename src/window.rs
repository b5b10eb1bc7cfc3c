//! The root of the view tree and owner of the offscreen render target.
//!
//! A frame is painted into a multisampled framebuffer and then blitted to the
//! default framebuffer, which lets the driver resolve the samples.
//!
//! Two behaviours are deliberately kept as they are, though both look
//! incomplete:
//!
//! - clipping only narrows the right and bottom edges. A view with a negative
//!   offset paints past its parent's left or top edge, matching
//!   [`Tree::window_rect`].
//! - mouse events only reach direct children of the container, hit tested
//!   against their raw local bounds. Grandchildren never receive events and
//!   [`Tree::point_in_view`] is not consulted.

use crate::config::ContainerConfig;
use crate::error::Result;
use crate::platform::ClientArea;
use crate::renderer::{
    Buffers, Filter, FramebufferStatus, FramebufferTarget, Graphics, Ortho, PaintContext,
    Viewport,
};
use crate::tree::{Tree, ViewId};
use crate::views::{MouseEvent, Rect, Size, View};

pub struct WindowContainer<G: Graphics, C: ClientArea> {
    graphics: G,
    client: C,
    config: ContainerConfig,
    tree: Tree,
    /// Top-level views in paint order (last is topmost)
    views: Vec<ViewId>,
    framebuffer: G::Framebuffer,
    color_buffer: G::Renderbuffer,
}

impl<G: Graphics, C: ClientArea> WindowContainer<G, C> {
    /// Allocate the multisample target and attach it to a new framebuffer.
    ///
    /// Storage is sized from `config.initial_size` until the first
    /// [`on_size`](Self::on_size). An incomplete framebuffer is logged and
    /// construction carries on; only failing to create the GL objects
    /// themselves is an error.
    pub fn new(mut graphics: G, client: C, config: ContainerConfig) -> Result<Self> {
        graphics.enable_multisample();

        let framebuffer = graphics.create_framebuffer()?;
        graphics.bind_framebuffer(FramebufferTarget::Both, Some(framebuffer));

        let color_buffer = match graphics.create_renderbuffer() {
            Ok(renderbuffer) => renderbuffer,
            Err(err) => {
                graphics.delete_framebuffer(framebuffer);
                return Err(err);
            }
        };
        graphics.bind_renderbuffer(Some(color_buffer));
        graphics.renderbuffer_storage_multisample(config.samples, config.initial_size);
        graphics.attach_color_renderbuffer(color_buffer);

        let status = graphics.framebuffer_status();
        if status.is_complete() {
            log::info!(
                "Created {}x multisample target: {}x{}",
                config.samples,
                config.initial_size.width,
                config.initial_size.height
            );
        } else if let FramebufferStatus::Incomplete(code) = status {
            log::warn!("Framebuffer is incomplete: {:#x}", code);
        }

        Ok(Self {
            graphics,
            client,
            config,
            tree: Tree::new(),
            views: Vec::new(),
            framebuffer,
            color_buffer,
        })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn graphics(&self) -> &G {
        &self.graphics
    }

    pub fn graphics_mut(&mut self) -> &mut G {
        &mut self.graphics
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Live client area size, queried from the platform on every call.
    pub fn client_size(&self) -> Size {
        self.client.client_size()
    }

    /// Shorthand for inserting a view into the tree and adding it here.
    pub fn insert_view(&mut self, bounds: Rect, view: impl View + 'static) -> ViewId {
        let id = self.tree.insert(bounds, view);
        self.add_view(id);
        id
    }

    /// Append a view to the top-level list.
    ///
    /// The view's parent link is cleared: the container is not an ancestor
    /// for geometry, so top-level views keep their stored bounds as their
    /// window rectangle. Returns `false` for a stale id.
    pub fn add_view(&mut self, id: ViewId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        self.views.push(id);
        self.tree.set_parent_link(id, None);
        true
    }

    /// Remove a top-level view and its subtree.
    pub fn remove_view(&mut self, id: ViewId) -> bool {
        let before = self.views.len();
        self.views.retain(|&v| v != id);
        let removed = self.views.len() != before;
        removed && self.tree.remove(id)
    }

    /// Top-level views in paint order.
    pub fn views(&self) -> &[ViewId] {
        &self.views
    }

    /// The `index`-th top-level view, or `None` when out of range.
    pub fn child_view(&self, index: usize) -> Option<ViewId> {
        self.views.get(index).copied()
    }

    /// Reallocate the colour buffer storage for a new client size.
    ///
    /// The framebuffer object itself is kept.
    pub fn on_size(&mut self, width: i32, height: i32) {
        log::debug!("Resizing multisample target to {}x{}", width, height);
        self.graphics.bind_renderbuffer(Some(self.color_buffer));
        let size = Size::new(width, height);
        self.graphics.renderbuffer_storage_multisample(self.config.samples, size);
    }

    /// Bind the offscreen target and prepare it for a new frame.
    pub fn start_paint(&mut self) {
        let size = self.client_size();

        self.graphics.bind_framebuffer(FramebufferTarget::Both, Some(self.framebuffer));
        self.graphics.enable_alpha_blending();
        self.graphics.set_projection(Ortho::top_left(size));
        self.graphics.set_viewport(Viewport::new(0, 0, size.width, size.height));
        self.graphics.set_clear_color(self.config.clear_color);
        self.graphics.clear(Buffers::COLOR);
    }

    /// Blit the offscreen target to the default framebuffer and flush.
    pub fn end_paint(&mut self) {
        let size = self.client_size();
        let region = Rect::from_size(size);

        self.graphics.bind_framebuffer(FramebufferTarget::Both, None);
        self.graphics.bind_framebuffer(FramebufferTarget::Read, Some(self.framebuffer));
        self.graphics.bind_framebuffer(FramebufferTarget::Draw, None);
        self.graphics.blit_framebuffer(region, region, Buffers::COLOR, Filter::Nearest);
        self.graphics.bind_framebuffer(FramebufferTarget::Both, None);

        self.graphics.flush();
    }

    /// Paint a full frame.
    pub fn on_paint(&mut self) {
        let size = self.client_size();

        self.start_paint();
        paint_views(
            &self.tree,
            &mut self.graphics,
            size.height,
            &self.views,
            Rect::from_size(size),
        );
        self.end_paint();
    }

    /// Paint `views` and their descendants inside `clip`, in order.
    ///
    /// Each view is placed at `clip`'s top-left plus its local offset, then
    /// shrunk so it ends at `clip`'s right and bottom edges at most. A view
    /// left with a negative width or height is skipped along with its
    /// subtree; a zero-sized view is still painted. Children are painted
    /// after their parent, clipped to the parent's clipped rectangle.
    pub fn paint_subviews(&mut self, views: &[ViewId], clip: Rect) {
        let client_height = self.client_size().height;
        paint_views(&self.tree, &mut self.graphics, client_height, views, clip);
    }

    /// Deliver a press to the topmost top-level view under the pointer.
    ///
    /// Returns the view that received it, if any.
    pub fn on_mouse_down(&mut self, event: MouseEvent) -> Option<ViewId> {
        self.dispatch_mouse(event, |view, event| view.on_mouse_down(event))
    }

    pub fn on_mouse_up(&mut self, event: MouseEvent) -> Option<ViewId> {
        self.dispatch_mouse(event, |view, event| view.on_mouse_up(event))
    }

    pub fn on_mouse_move(&mut self, event: MouseEvent) -> Option<ViewId> {
        self.dispatch_mouse(event, |view, event| view.on_mouse_move(event))
    }

    /// Walk top-level views from topmost down and hand the event, in local
    /// coordinates, to the first whose local bounds strictly contain it.
    fn dispatch_mouse(
        &mut self,
        event: MouseEvent,
        deliver: impl FnOnce(&mut dyn View, MouseEvent),
    ) -> Option<ViewId> {
        let (id, bounds) = self.views.iter().rev().find_map(|&id| {
            let bounds = self.tree.bounds(id)?;
            bounds.contains(event.x, event.y).then_some((id, bounds))
        })?;

        let local = event.with_coords(
            event.x.saturating_sub(bounds.left),
            event.y.saturating_sub(bounds.top),
        );
        log::trace!(
            "Mouse event at ({}, {}) goes to view {:#x}",
            event.x,
            event.y,
            id.as_u64()
        );
        deliver(self.tree.view_mut(id)?, local);
        Some(id)
    }
}

impl<G: Graphics, C: ClientArea> Drop for WindowContainer<G, C> {
    fn drop(&mut self) {
        self.graphics.delete_renderbuffer(self.color_buffer);
        self.graphics.delete_framebuffer(self.framebuffer);
    }
}

fn paint_views<G: Graphics>(
    tree: &Tree,
    graphics: &mut G,
    client_height: i32,
    views: &[ViewId],
    clip: Rect,
) {
    for &id in views {
        let (Some(view), Some(bounds)) = (tree.view(id), tree.bounds(id)) else {
            continue;
        };

        let x = clip.left.saturating_add(bounds.left);
        let y = clip.top.saturating_add(bounds.top);
        let mut width = bounds.width();
        let mut height = bounds.height();

        if x.saturating_add(width) > clip.right {
            width = clip.right.saturating_sub(x);
        }
        if y.saturating_add(height) > clip.bottom {
            height = clip.bottom.saturating_sub(y);
        }

        if width < 0 || height < 0 {
            log::trace!("Skipping view {:#x}: {}x{}", id.as_u64(), width, height);
            continue;
        }

        let size = Size::new(width, height);
        graphics.set_projection(Ortho::top_left(size));
        let gl_y = client_height.saturating_sub(height).saturating_sub(y);
        graphics.set_viewport(Viewport::new(x, gl_y, width, height));

        view.paint(&mut PaintContext::new(&mut *graphics, size));

        paint_views(
            tree,
            graphics,
            client_height,
            tree.children(id),
            Rect::new(x, y, x.saturating_add(width), y.saturating_add(height)),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::platform::SharedClientArea;
    use crate::renderer::{GlCommand, RecordingGraphics};
    use crate::views::{solid, Color, MouseButton};

    #[derive(Debug, Clone, PartialEq)]
    enum Seen {
        Paint(&'static str, Size),
        Down(&'static str, MouseEvent),
        Up(&'static str, MouseEvent),
        Move(&'static str, MouseEvent),
    }

    type Log = Rc<RefCell<Vec<Seen>>>;

    struct Spy {
        name: &'static str,
        log: Log,
    }

    impl View for Spy {
        fn paint(&self, ctx: &mut PaintContext<'_>) {
            self.log.borrow_mut().push(Seen::Paint(self.name, ctx.size()));
        }

        fn on_mouse_down(&mut self, event: MouseEvent) {
            self.log.borrow_mut().push(Seen::Down(self.name, event));
        }

        fn on_mouse_up(&mut self, event: MouseEvent) {
            self.log.borrow_mut().push(Seen::Up(self.name, event));
        }

        fn on_mouse_move(&mut self, event: MouseEvent) {
            self.log.borrow_mut().push(Seen::Move(self.name, event));
        }
    }

    fn spy(name: &'static str, log: &Log) -> Spy {
        Spy {
            name,
            log: log.clone(),
        }
    }

    fn container(
        width: i32,
        height: i32,
    ) -> (
        WindowContainer<RecordingGraphics, SharedClientArea>,
        SharedClientArea,
    ) {
        let client = SharedClientArea::new(Size::new(width, height));
        let container = WindowContainer::new(
            RecordingGraphics::new(),
            client.clone(),
            ContainerConfig::default(),
        )
        .unwrap();
        (container, client)
    }

    fn viewports(commands: &[GlCommand]) -> Vec<Viewport> {
        commands
            .iter()
            .filter_map(|c| match c {
                GlCommand::SetViewport(vp) => Some(*vp),
                _ => None,
            })
            .collect()
    }

    fn paints(log: &Log) -> Vec<Seen> {
        log.borrow()
            .iter()
            .filter(|s| matches!(s, Seen::Paint(..)))
            .cloned()
            .collect()
    }

    #[test]
    fn test_construction_sequence() {
        let (container, _) = container(500, 500);

        assert_eq!(
            container.graphics().commands(),
            &[
                GlCommand::EnableMultisample,
                GlCommand::CreateFramebuffer(1),
                GlCommand::BindFramebuffer {
                    target: FramebufferTarget::Both,
                    framebuffer: Some(1),
                },
                GlCommand::CreateRenderbuffer(2),
                GlCommand::BindRenderbuffer(Some(2)),
                GlCommand::RenderbufferStorageMultisample {
                    samples: 8,
                    size: Size::new(500, 500),
                },
                GlCommand::AttachColorRenderbuffer(2),
                GlCommand::CheckFramebufferStatus,
            ]
        );
    }

    #[test]
    fn test_incomplete_framebuffer_is_not_fatal() {
        let gfx = RecordingGraphics::new().with_status(FramebufferStatus::Incomplete(0x8CD6));
        let container = WindowContainer::new(gfx, Size::new(10, 10), ContainerConfig::default());
        assert!(container.is_ok());
    }

    #[test]
    fn test_creation_failure_propagates() {
        let gfx = RecordingGraphics::new().failing_creation();
        let container = WindowContainer::new(gfx, Size::new(10, 10), ContainerConfig::default());
        assert!(container.is_err());
    }

    #[test]
    fn test_on_size_reallocates_storage_only() {
        let (mut container, _) = container(500, 500);
        container.graphics_mut().take_commands();

        container.on_size(800, 600);

        assert_eq!(
            container.graphics().commands(),
            &[
                GlCommand::BindRenderbuffer(Some(2)),
                GlCommand::RenderbufferStorageMultisample {
                    samples: 8,
                    size: Size::new(800, 600),
                },
            ]
        );
    }

    #[test]
    fn test_empty_frame_sequence() {
        let (mut container, _) = container(300, 200);
        container.graphics_mut().take_commands();

        container.on_paint();

        let full = Rect::new(0, 0, 300, 200);
        assert_eq!(
            container.graphics().commands(),
            &[
                GlCommand::BindFramebuffer {
                    target: FramebufferTarget::Both,
                    framebuffer: Some(1),
                },
                GlCommand::EnableAlphaBlending,
                GlCommand::SetProjection(Ortho::top_left(Size::new(300, 200))),
                GlCommand::SetViewport(Viewport::new(0, 0, 300, 200)),
                GlCommand::SetClearColor(Color::TRANSPARENT),
                GlCommand::Clear(Buffers::COLOR),
                GlCommand::BindFramebuffer {
                    target: FramebufferTarget::Both,
                    framebuffer: None,
                },
                GlCommand::BindFramebuffer {
                    target: FramebufferTarget::Read,
                    framebuffer: Some(1),
                },
                GlCommand::BindFramebuffer {
                    target: FramebufferTarget::Draw,
                    framebuffer: None,
                },
                GlCommand::BlitFramebuffer {
                    src: full,
                    dst: full,
                    buffers: Buffers::COLOR,
                    filter: Filter::Nearest,
                },
                GlCommand::BindFramebuffer {
                    target: FramebufferTarget::Both,
                    framebuffer: None,
                },
                GlCommand::Flush,
            ]
        );
    }

    #[test]
    fn test_paint_uses_live_client_size() {
        let (mut container, client) = container(500, 500);
        client.set(Size::new(800, 600));
        container.on_size(800, 600);
        container.graphics_mut().take_commands();

        container.on_paint();

        let commands = container.graphics().commands();
        assert!(commands.contains(&GlCommand::SetViewport(Viewport::new(0, 0, 800, 600))));
        assert!(commands.contains(&GlCommand::BlitFramebuffer {
            src: Rect::new(0, 0, 800, 600),
            dst: Rect::new(0, 0, 800, 600),
            buffers: Buffers::COLOR,
            filter: Filter::Nearest,
        }));
    }

    #[test]
    fn test_paint_is_preorder_with_flipped_viewports() {
        let log = Log::default();
        let (mut container, _) = container(200, 100);

        let parent = container.insert_view(Rect::new(10, 20, 110, 80), spy("parent", &log));
        let child = container
            .tree_mut()
            .insert(Rect::new(5, 5, 25, 15), spy("child", &log));
        container.tree_mut().add_view(parent, child);
        let sibling = container.insert_view(Rect::new(0, 0, 50, 50), spy("sibling", &log));
        assert_eq!(container.views(), &[parent, sibling]);

        container.graphics_mut().take_commands();
        container.on_paint();

        assert_eq!(
            paints(&log),
            vec![
                Seen::Paint("parent", Size::new(100, 60)),
                Seen::Paint("child", Size::new(20, 10)),
                Seen::Paint("sibling", Size::new(50, 50)),
            ]
        );

        // Full client viewport first, then one per view.
        assert_eq!(
            viewports(container.graphics().commands()),
            vec![
                Viewport::new(0, 0, 200, 100),
                Viewport::new(10, 100 - 60 - 20, 100, 60),
                Viewport::new(15, 100 - 10 - 25, 20, 10),
                Viewport::new(0, 100 - 50, 50, 50),
            ]
        );
    }

    #[test]
    fn test_projection_scoped_to_view() {
        let log = Log::default();
        let (mut container, _) = container(200, 100);
        container.insert_view(Rect::new(10, 10, 40, 30), spy("a", &log));
        container.graphics_mut().take_commands();

        container.on_paint();

        assert!(container
            .graphics()
            .commands()
            .contains(&GlCommand::SetProjection(Ortho::top_left(Size::new(30, 20)))));
    }

    #[test]
    fn test_children_clipped_to_parent_bottom_right() {
        let log = Log::default();
        let (mut container, _) = container(200, 200);

        let parent = container.insert_view(Rect::new(0, 0, 50, 50), spy("parent", &log));
        let child = container
            .tree_mut()
            .insert(Rect::new(30, 40, 100, 100), spy("child", &log));
        container.tree_mut().add_view(parent, child);

        container.on_paint();

        assert_eq!(
            paints(&log),
            vec![
                Seen::Paint("parent", Size::new(50, 50)),
                Seen::Paint("child", Size::new(20, 10)),
            ]
        );
    }

    #[test]
    fn test_negative_offset_not_clipped_on_top_left() {
        let log = Log::default();
        let (mut container, _) = container(200, 200);

        let parent = container.insert_view(Rect::new(50, 50, 100, 100), spy("parent", &log));
        let child = container
            .tree_mut()
            .insert(Rect::new(-20, -10, 10, 10), spy("child", &log));
        container.tree_mut().add_view(parent, child);
        container.graphics_mut().take_commands();

        container.on_paint();

        assert_eq!(
            paints(&log)[1],
            Seen::Paint("child", Size::new(30, 20))
        );
        assert_eq!(
            viewports(container.graphics().commands())[2],
            Viewport::new(30, 200 - 20 - 40, 30, 20)
        );
    }

    #[test]
    fn test_negative_size_skips_subtree_but_zero_paints() {
        let log = Log::default();
        let (mut container, _) = container(100, 100);

        let clipped_out = container.insert_view(Rect::new(120, 0, 150, 10), spy("out", &log));
        let hidden = container
            .tree_mut()
            .insert(Rect::new(0, 0, 5, 5), spy("hidden", &log));
        container.tree_mut().add_view(clipped_out, hidden);

        container.insert_view(Rect::new(100, 0, 130, 10), spy("edge", &log));
        container.insert_view(Rect::new(10, 10, 10, 20), spy("flat", &log));

        container.on_paint();

        assert_eq!(
            paints(&log),
            vec![
                Seen::Paint("edge", Size::new(0, 10)),
                Seen::Paint("flat", Size::new(0, 10)),
            ]
        );
    }

    #[test]
    fn test_paint_subviews_with_explicit_clip() {
        let log = Log::default();
        let (mut container, _) = container(100, 100);
        let id = container
            .tree_mut()
            .insert(Rect::new(0, 0, 40, 40), spy("free", &log));

        container.paint_subviews(&[id], Rect::new(10, 10, 30, 30));

        assert_eq!(paints(&log), vec![Seen::Paint("free", Size::new(20, 20))]);
    }

    #[test]
    fn test_extreme_bounds_paint_and_dispatch() {
        let log = Log::default();
        let (mut container, _) = container(100, 100);

        let wide = container.insert_view(Rect::new(-10, 0, i32::MAX, 10), spy("wide", &log));
        let far = container
            .tree_mut()
            .insert(Rect::new(i32::MAX - 5, 0, i32::MAX, 5), spy("far", &log));
        container.tree_mut().add_view(wide, far);
        container.insert_view(Rect::new(i32::MIN, i32::MIN, 0, 0), spy("huge", &log));

        container.on_paint();

        assert_eq!(
            paints(&log),
            vec![
                Seen::Paint("wide", Size::new(110, 10)),
                Seen::Paint("huge", Size::new(i32::MAX, i32::MAX)),
            ]
        );

        let event = MouseEvent::new(50, 5, None);
        assert_eq!(container.on_mouse_move(event), Some(wide));
        assert_eq!(
            log.borrow().last(),
            Some(&Seen::Move("wide", MouseEvent::new(60, 5, None)))
        );
    }

    #[test]
    fn test_fills_follow_blend_setup_and_frame_clear() {
        let (mut container, _) = container(100, 100);
        let panel = container.insert_view(Rect::new(0, 0, 50, 50), solid(Color::WHITE));
        let overlay = container
            .tree_mut()
            .insert(Rect::new(10, 10, 30, 30), solid(Color::rgba(1.0, 0.0, 0.0, 0.5)));
        container.tree_mut().add_view(panel, overlay);
        container.graphics_mut().take_commands();

        container.on_paint();

        let commands = container.graphics().commands();
        let positions = |pred: fn(&GlCommand) -> bool| -> Vec<usize> {
            commands
                .iter()
                .enumerate()
                .filter(|(_, c)| pred(c))
                .map(|(i, _)| i)
                .collect()
        };
        let blend = positions(|c| *c == GlCommand::EnableAlphaBlending);
        let clears = positions(|c| matches!(c, GlCommand::Clear(_)));
        let fills = positions(|c| matches!(c, GlCommand::FillRect { .. }));

        assert_eq!(blend.len(), 1);
        assert_eq!(clears.len(), 1);
        assert_eq!(fills.len(), 2);
        // Overlapping fills are blended over the cleared frame, never cleared.
        assert!(blend[0] < clears[0] && clears[0] < fills[0]);
        assert_eq!(
            commands[fills[1]],
            GlCommand::FillRect {
                rect: Rect::new(0, 0, 20, 20),
                color: Color::rgba(1.0, 0.0, 0.0, 0.5),
            }
        );
    }

    #[test]
    fn test_root_add_view_clears_parent() {
        let log = Log::default();
        let (mut container, _) = container(100, 100);
        let parent = container.tree_mut().insert(Rect::new(0, 0, 50, 50), spy("p", &log));
        let child = container.tree_mut().insert(Rect::new(0, 0, 10, 10), spy("c", &log));
        container.tree_mut().add_view(parent, child);
        assert_eq!(container.tree().parent(child), Some(parent));

        assert!(container.add_view(child));
        assert_eq!(container.tree().parent(child), None);
    }

    #[test]
    fn test_child_view_sentinel() {
        let log = Log::default();
        let (mut container, _) = container(100, 100);
        let a = container.insert_view(Rect::new(0, 0, 10, 10), spy("a", &log));

        assert_eq!(container.child_view(0), Some(a));
        assert_eq!(container.child_view(1), None);
    }

    #[test]
    fn test_remove_view() {
        let log = Log::default();
        let (mut container, _) = container(100, 100);
        let a = container.insert_view(Rect::new(0, 0, 10, 10), spy("a", &log));
        let b = container.insert_view(Rect::new(0, 0, 10, 10), spy("b", &log));

        assert!(container.remove_view(a));
        assert!(!container.remove_view(a));
        assert_eq!(container.views(), &[b]);
        assert!(!container.tree().contains(a));
    }

    #[test]
    fn test_topmost_view_receives_event() {
        let log = Log::default();
        let (mut container, _) = container(200, 200);
        let _a = container.insert_view(Rect::new(0, 0, 100, 100), spy("a", &log));
        let _b = container.insert_view(Rect::new(20, 20, 120, 120), spy("b", &log));
        let c = container.insert_view(Rect::new(40, 40, 140, 140), spy("c", &log));

        let event = MouseEvent::new(50, 60, Some(MouseButton::Left));
        assert_eq!(container.on_mouse_down(event), Some(c));

        assert_eq!(
            *log.borrow(),
            vec![Seen::Down(
                "c",
                MouseEvent::new(10, 20, Some(MouseButton::Left))
            )]
        );
    }

    #[test]
    fn test_mouse_edges_and_misses() {
        let log = Log::default();
        let (mut container, _) = container(200, 200);
        let a = container.insert_view(Rect::new(10, 10, 20, 20), spy("a", &log));

        assert_eq!(container.on_mouse_move(MouseEvent::new(10, 15, None)), None);
        assert_eq!(container.on_mouse_move(MouseEvent::new(20, 20, None)), None);
        assert_eq!(container.on_mouse_move(MouseEvent::new(50, 50, None)), None);
        assert_eq!(container.on_mouse_move(MouseEvent::new(11, 19, None)), Some(a));

        assert_eq!(
            *log.borrow(),
            vec![Seen::Move("a", MouseEvent::new(1, 9, None))]
        );
    }

    #[test]
    fn test_mouse_dispatch_stays_at_top_level() {
        let log = Log::default();
        let (mut container, _) = container(200, 200);
        let parent = container.insert_view(Rect::new(0, 0, 100, 100), spy("parent", &log));
        let child = container
            .tree_mut()
            .insert(Rect::new(10, 10, 50, 50), spy("child", &log));
        container.tree_mut().add_view(parent, child);

        let event = MouseEvent::new(20, 20, Some(MouseButton::Right));
        assert_eq!(container.on_mouse_up(event), Some(parent));
        assert_eq!(*log.borrow(), vec![Seen::Up("parent", event)]);
    }

    #[test]
    fn test_drop_releases_target() {
        let mut gfx = RecordingGraphics::new();
        let container =
            WindowContainer::new(&mut gfx, Size::new(100, 100), ContainerConfig::default())
                .unwrap();
        drop(container);

        let commands = gfx.commands();
        assert_eq!(
            &commands[commands.len() - 2..],
            &[GlCommand::DeleteRenderbuffer(2), GlCommand::DeleteFramebuffer(1)]
        );
    }
}
