//! Canvas rendering for the relationship graph.
//!
//! Maps the node/edge model plus live simulation positions to drawable
//! attributes every tick. Drawing passes: background (screen space), then
//! edges, nodes, and labels under the pan/zoom transform.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::components::relationship_graph::state::GraphViewState;
use crate::components::relationship_graph::style::{self, ScaledSizes, StyleConfig};
use crate::components::relationship_graph::theme::Theme;

/// Renders the complete graph to the canvas.
pub fn render(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	config: &StyleConfig,
	theme: &Theme,
) {
	let sizes = ScaledSizes::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, config, &sizes, theme);
	draw_nodes(state, ctx, config, &sizes, theme);

	ctx.restore();
}

fn draw_background(state: &GraphViewState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				(state.width.max(state.height)) * 0.8,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background.color_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	config: &StyleConfig,
	sizes: &ScaledSizes,
	theme: &Theme,
) {
	for wired in state.wired_edges() {
		let (src, tgt) = (wired.source, wired.target);
		let edge = &state.graph.edges[wired.edge];
		let (Some((x1, y1)), Some((x2, y2))) = (state.sim.position(src), state.sim.position(tgt))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = dx.hypot(dy);
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		let src_radius = config.radius(
			state.graph.nodes[src].kind,
			state.emphasis.intensity(src),
		);
		let tgt_radius = config.radius(
			state.graph.nodes[tgt].kind,
			state.emphasis.intensity(tgt),
		);

		let color = style::edge_color(&edge.policy, theme);
		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(sizes.edge_width);

		// Lighter-weight edges are contextual (locations, inferred links);
		// render them dashed.
		if edge.weight < 1.0 {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(6.0),
				&JsValue::from_f64(4.0),
			));
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		ctx.begin_path();
		ctx.move_to(x1 + ux * src_radius, y1 + uy * src_radius);
		ctx.line_to(
			x2 - ux * (tgt_radius + sizes.arrow_size),
			y2 - uy * (tgt_radius + sizes.arrow_size),
		);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		draw_arrowhead(ctx, x2, y2, ux, uy, tgt_radius, sizes, &color.to_css());
	}
}

#[allow(clippy::too_many_arguments)]
fn draw_arrowhead(
	ctx: &CanvasRenderingContext2d,
	x2: f64,
	y2: f64,
	ux: f64,
	uy: f64,
	tgt_radius: f64,
	sizes: &ScaledSizes,
	css: &str,
) {
	let (tip_x, tip_y) = (x2 - ux * tgt_radius, y2 - uy * tgt_radius);
	let (back_x, back_y) = (tip_x - ux * sizes.arrow_size, tip_y - uy * sizes.arrow_size);
	let (px, py) = (-uy * sizes.arrow_size * 0.5, ux * sizes.arrow_size * 0.5);

	ctx.set_fill_style_str(css);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	config: &StyleConfig,
	sizes: &ScaledSizes,
	theme: &Theme,
) {
	for (idx, node) in state.graph.nodes.iter().enumerate() {
		let Some((x, y)) = state.sim.position(idx) else {
			continue;
		};
		let radius = config.radius(node.kind, state.emphasis.intensity(idx));
		let color = style::node_color(node.kind, theme);

		if theme.node_gradient {
			let gradient = ctx
				.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.unwrap();
			gradient
				.add_color_stop(0.0, &color.lighten(0.4).to_css())
				.unwrap();
			gradient.add_color_stop(0.7, &color.to_css()).unwrap();
			gradient
				.add_color_stop(1.0, &color.darken(0.2).to_css())
				.unwrap();

			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		} else {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&color.to_css());
			ctx.fill();
		}

		// Label below the circle, offset by the rendered radius so the two
		// never overlap.
		ctx.set_fill_style_str(&theme.label_color.to_css());
		ctx.set_font(&sizes.label_font);
		ctx.set_text_align("center");
		ctx.set_text_baseline("top");
		let _ = ctx.fill_text(&node.label, x, y + sizes.label_offset(radius));
	}
}
