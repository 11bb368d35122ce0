//! Leptos component wrapping the relationship graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel
//! handlers for node dragging, panning, zooming, hovering, and click
//! dispatch. An animation loop runs via `requestAnimationFrame`; teardown
//! raises a stop signal that is checked before every tick so a torn-down
//! view is never mutated.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::interaction::clamp_to_canvas;
use super::render;
use super::state::GraphViewState;
use super::style::StyleConfig;
use super::theme::Theme;
use super::types::{CaseData, NodeKind};

/// Bundles view state with visual configuration.
struct GraphContext {
	state: GraphViewState,
	style: StyleConfig,
	theme: Theme,
}

/// Renders an interactive provenance relationship graph on a canvas element.
///
/// The host hands in one immutable case snapshot via the `data` signal and
/// receives `(node_id, node_kind)` through `on_node_click`. The component
/// sizes itself to its parent container by default; set `fullscreen = true`
/// to fill the viewport, or pass explicit `width`/`height`.
#[component]
pub fn RelationshipGraphCanvas(
	#[prop(into)] data: Signal<CaseData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional, into)] on_node_click: Option<Callback<(String, NodeKind)>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	// Stop flag lives in the reactive arena so the cleanup closure stays
	// Send + Sync; a disposed arena reads as stopped.
	let stopped: StoredValue<bool> = StoredValue::new(false);
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init) = (context.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		*context_init.borrow_mut() = Some(GraphContext {
			state: GraphViewState::new(&data.get(), w, h),
			style: StyleConfig::default(),
			theme: Theme::default(),
		});

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			// Stop signal raised by teardown; checked before any mutation.
			if stopped.try_get_value().unwrap_or(true) {
				if let Some(ref mut c) = *context_anim.borrow_mut() {
					c.state.dispose();
				}
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let dt = 0.016;
				c.state.tick(dt);
				render::render(&c.state, &ctx, &c.style, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	on_cleanup(move || {
		stopped.try_update_value(|stopped| *stopped = true);
	});

	let pointer_position = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			let (x, y) = clamp_to_canvas(x, y, c.state.width, c.state.height);
			if let Some(idx) = c.state.node_at_position(x, y, &c.style) {
				c.state.drag.begin(idx, x, y);
				c.state.pin_node(idx, x, y);
			} else {
				let transform = c.state.transform;
				c.state.pan.begin(x, y, &transform);
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			let (x, y) = clamp_to_canvas(x, y, c.state.width, c.state.height);
			if c.state.drag.active {
				if let Some(idx) = c.state.drag.node {
					c.state.pin_node(idx, x, y);
				}
			} else if c.state.pan.active {
				let pan = c.state.pan;
				pan.apply(x, y, &mut c.state.transform);
			} else {
				let hovered = c.state.node_at_position(x, y, &c.style);
				c.state.set_hover(hovered);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			let (x, y) = clamp_to_canvas(x, y, c.state.width, c.state.height);
			if c.state.drag.active {
				if let Some(idx) = c.state.drag.node {
					c.state.release_node(idx);
					if c.state.drag.is_click(x, y) {
						if let (Some(cb), Some(node)) = (on_node_click, c.state.node(idx)) {
							cb.run((node.id.clone(), node.kind));
						}
					}
				}
			}
			c.state.drag.end();
			c.state.pan.end();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			if let Some(idx) = c.state.drag.node {
				c.state.release_node(idx);
			}
			c.state.drag.end();
			c.state.pan.end();
			c.state.set_hover(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(ev.as_ref()) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let (x, y) = clamp_to_canvas(x, y, c.state.width, c.state.height);
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.transform.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="relationship-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
