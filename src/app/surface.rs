// SPDX-License-Identifier: GPL-3.0-only

//! Gesture surface for the bubble
//!
//! Wraps the preview content and translates pointer input into messages:
//! scroll and pinch resize the bubble, left press starts a window drag,
//! right press opens the context menu. Scroll deltas run through the
//! momentum filter so inertial tails are swallowed without effect.

use crate::app::gestures::ScrollFilter;
use crate::app::state::Message;
use crate::constants::ui;
use cosmic::iced::advanced::widget::{Operation, Tree, tree};
use cosmic::iced::advanced::{Clipboard, Layout, Shell, Widget, layout, mouse, renderer};
use cosmic::iced::event::Status;
use cosmic::iced::{Element, Event, Length, Point, Rectangle, Size, touch};
use cosmic::{Renderer, Theme};
use std::collections::HashMap;
use std::time::Instant;

/// Per-instance gesture state kept in the widget tree
#[derive(Default)]
struct SurfaceState {
    /// Momentum classifier for wheel events
    scroll_filter: ScrollFilter,
    /// Active finger positions (up to 2 tracked)
    fingers: HashMap<touch::Finger, Point>,
    /// Distance between the two fingers at the previous pinch step
    last_distance: Option<f32>,
}

/// Widget wrapping the bubble content with gesture handling
pub struct BubbleSurface<'a> {
    content: Element<'a, Message, Theme, Renderer>,
}

impl<'a> BubbleSurface<'a> {
    pub fn new(content: impl Into<Element<'a, Message, Theme, Renderer>>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl<'a> Widget<Message, Theme, Renderer> for BubbleSurface<'a> {
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<SurfaceState>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(SurfaceState::default())
    }

    fn children(&self) -> Vec<Tree> {
        vec![Tree::new(&self.content)]
    }

    fn diff(&mut self, tree: &mut Tree) {
        tree.diff_children(std::slice::from_mut(&mut self.content));
    }

    fn size(&self) -> Size<Length> {
        self.content.as_widget().size()
    }

    fn layout(
        &self,
        tree: &mut Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        self.content
            .as_widget()
            .layout(&mut tree.children[0], renderer, limits)
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        self.content.as_widget().draw(
            &tree.children[0],
            renderer,
            theme,
            style,
            layout,
            cursor,
            viewport,
        );
    }

    fn operate(
        &self,
        tree: &mut Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn Operation,
    ) {
        self.content
            .as_widget()
            .operate(&mut tree.children[0], layout, renderer, operation);
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        self.content.as_widget().mouse_interaction(
            &tree.children[0],
            layout,
            cursor,
            viewport,
            renderer,
        )
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) -> Status {
        // The content gets first refusal
        let status = self.content.as_widget_mut().on_event(
            &mut tree.children[0],
            event.clone(),
            layout,
            cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        );
        if status == Status::Captured {
            return status;
        }

        let bounds = layout.bounds();
        let state = tree.state.downcast_mut::<SurfaceState>();

        match event {
            // Two-finger pinch resizes around the current size
            Event::Touch(touch_event) => match touch_event {
                touch::Event::FingerPressed { id, position } => {
                    if bounds.contains(position) {
                        state.fingers.insert(id, position);
                        if state.fingers.len() == 2 {
                            state.last_distance = Some(finger_distance(&state.fingers));
                        }
                        return Status::Captured;
                    }
                    Status::Ignored
                }
                touch::Event::FingerMoved { id, position } => {
                    if let std::collections::hash_map::Entry::Occupied(mut entry) =
                        state.fingers.entry(id)
                    {
                        entry.insert(position);

                        if state.fingers.len() == 2 {
                            let distance = finger_distance(&state.fingers);
                            if let Some(last) = state.last_distance {
                                if last > 1.0 {
                                    let magnification = distance / last - 1.0;
                                    shell.publish(Message::SurfaceMagnified(magnification));
                                }
                            }
                            state.last_distance = Some(distance);
                        }
                        return Status::Captured;
                    }
                    Status::Ignored
                }
                touch::Event::FingerLifted { id, .. } | touch::Event::FingerLost { id, .. } => {
                    if state.fingers.remove(&id).is_some() {
                        state.last_distance = None;
                        return Status::Captured;
                    }
                    Status::Ignored
                }
            },

            Event::Mouse(mouse::Event::WheelScrolled { delta }) if cursor.is_over(bounds) => {
                let delta_y = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => y * ui::SCROLL_LINE_STEP,
                    mouse::ScrollDelta::Pixels { y, .. } => y,
                };

                // Inertial tails are consumed without publishing
                if state.scroll_filter.accept(delta_y, Instant::now()) {
                    shell.publish(Message::SurfaceScrolled(delta_y));
                }
                Status::Captured
            }

            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right))
                if cursor.is_over(bounds) =>
            {
                shell.publish(Message::OpenContextMenu);
                Status::Captured
            }

            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
                if cursor.is_over(bounds) =>
            {
                shell.publish(Message::BeginDrag);
                Status::Captured
            }

            _ => Status::Ignored,
        }
    }
}

fn finger_distance(fingers: &HashMap<touch::Finger, Point>) -> f32 {
    let points: Vec<&Point> = fingers.values().collect();
    let dx = points[0].x - points[1].x;
    let dy = points[0].y - points[1].y;
    (dx * dx + dy * dy).sqrt()
}

impl<'a> From<BubbleSurface<'a>> for Element<'a, Message, Theme, Renderer> {
    fn from(surface: BubbleSurface<'a>) -> Self {
        Element::new(surface)
    }
}
