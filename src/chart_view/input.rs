//! Pointer state machine: rubber-band zoom, drag panning and hover.
//!
//! Transitions are pure functions of the current state, the event and the
//! plot they happen on. Range changes come out as [`GestureEffect`]s for the
//! owner to apply; nothing here touches the axis itself.

use crate::coordinate_space::AxisSnapshot;
use crate::data_types::HoverState;
use crate::plot_context::PlotContext;
use crate::view_controller::ViewController;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// Canvas-relative pointer and keyboard input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32, shift: bool },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Leave,
    KeyDown(Key),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomGesture {
    /// Domain x where the selection started.
    pub start: f64,
    pub end: f64,
    pub mouse_px: f32,
    pub snapshot: AxisSnapshot,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveGesture {
    pub start: f64,
    pub mouse_px: f32,
    pub snapshot: AxisSnapshot,
    /// Last previewed window.
    pub preview: (f64, f64),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Zooming(ZoomGesture),
    Moving(MoveGesture),
}

#[derive(Clone, Debug, PartialEq)]
pub enum GestureEffect {
    /// Live window change, not to be fetched.
    PreviewRange { start: f64, end: f64 },
    /// Final window; the owner clamps it and loads data.
    CommitRange { start: f64, end: f64 },
    /// Selection overlay between two canvas x positions.
    RubberBand { from_px: f32, to_px: f32 },
    ClearRubberBand,
    Hover(Option<HoverState>),
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn transition(self, event: PointerEvent, ctx: &PlotContext) -> (GestureState, Vec<GestureEffect>) {
        match (self, event) {
            (GestureState::Idle, PointerEvent::Down { x, y, shift }) => {
                let area = ctx.plot_area();
                let Some(axis) = ctx.x_axis() else {
                    return (self, Vec::new());
                };
                if !area.contains(x, y) {
                    return (self, Vec::new());
                }
                let domain_x = axis.get_plot_coordinate(x - area.x);
                let snapshot = axis.snapshot();
                let next = if shift {
                    GestureState::Zooming(ZoomGesture {
                        start: domain_x,
                        end: domain_x,
                        mouse_px: x,
                        snapshot,
                    })
                } else {
                    GestureState::Moving(MoveGesture {
                        start: domain_x,
                        mouse_px: x,
                        snapshot,
                        preview: (snapshot.start, snapshot.end),
                    })
                };
                trace!(shift, domain_x, "gesture started");
                (next, vec![GestureEffect::Hover(None)])
            }

            (GestureState::Idle, PointerEvent::Move { x, y }) => {
                (self, vec![GestureEffect::Hover(hover_at(ctx, x, y))])
            }

            (GestureState::Idle, PointerEvent::Leave) => (self, vec![GestureEffect::Hover(None)]),

            (GestureState::Zooming(mut zoom), PointerEvent::Move { x, .. }) => {
                let area = ctx.plot_area();
                let x = x.clamp(area.x, area.x + area.width);
                zoom.end = zoom.snapshot.start + (x - area.x) as f64 * zoom.snapshot.ratio;
                let effect = GestureEffect::RubberBand {
                    from_px: zoom.mouse_px.min(x),
                    to_px: zoom.mouse_px.max(x),
                };
                (GestureState::Zooming(zoom), vec![effect])
            }

            (GestureState::Zooming(zoom), PointerEvent::Up { .. }) => {
                let (start, end) = ViewController::zoom_selection(zoom.start, zoom.end);
                (
                    GestureState::Idle,
                    vec![
                        GestureEffect::ClearRubberBand,
                        GestureEffect::CommitRange { start, end },
                    ],
                )
            }

            (GestureState::Moving(mut pan), PointerEvent::Move { x, .. }) => {
                let (start, end) = ViewController::pan(&pan.snapshot, pan.mouse_px, x);
                pan.preview = (start, end);
                (
                    GestureState::Moving(pan),
                    vec![GestureEffect::PreviewRange { start, end }],
                )
            }

            (GestureState::Moving(pan), PointerEvent::Up { .. }) => {
                let (start, end) = pan.preview;
                (GestureState::Idle, vec![GestureEffect::CommitRange { start, end }])
            }

            (GestureState::Zooming(_), PointerEvent::KeyDown(Key::Escape)) => {
                trace!("zoom cancelled");
                (GestureState::Idle, vec![GestureEffect::ClearRubberBand])
            }

            // The preview already moved the window; put it back.
            (GestureState::Moving(pan), PointerEvent::KeyDown(Key::Escape)) => {
                trace!("pan cancelled");
                (
                    GestureState::Idle,
                    vec![GestureEffect::PreviewRange {
                        start: pan.snapshot.start,
                        end: pan.snapshot.end,
                    }],
                )
            }

            (state, _) => (state, Vec::new()),
        }
    }
}

fn hover_at(ctx: &PlotContext, x: f32, y: f32) -> Option<HoverState> {
    let point = ctx.get_nearest_item(x, y, None)?.clone();
    let area = ctx.plot_area();
    let anchor_x = area.x + ctx.x_axis()?.get_canvas_coordinate(point.x);
    Some(HoverState {
        point,
        pointer: (x, y),
        anchor_x,
    })
}

#[derive(Clone, Debug, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn handle(&mut self, event: PointerEvent, ctx: &PlotContext) -> Vec<GestureEffect> {
        let (next, effects) = self.state.transition(event, ctx);
        self.state = next;
        effects
    }
}
