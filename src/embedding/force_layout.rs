//! Default embedder: a principal-axis projection refined by a force
//! simulation over the k-nearest-neighbour graph.
//!
//! Every record starts at its projection onto the two principal axes of the
//! centred metric matrix, so the initial layout already reflects Euclidean
//! distances. Each record is then tethered to a fixed anchor at that start
//! position, springs pull it towards its `neighbors` closest records, and
//! node charge keeps near-duplicates from collapsing onto one spot. The
//! result is normalised to `[-spread, spread]`.

use std::collections::HashSet;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::{EmbeddingConfig, Embedder};
use crate::data::ChartError;

/// Charge used at the default minimum distance of 0.1.
const BASE_CHARGE: f32 = 2.0;
const DEFAULT_MIN_DISTANCE: f64 = 0.1;
/// Half-extent of the projected start layout, in simulation units.
const START_RADIUS: f64 = 100.0;
const POWER_ITERATIONS: usize = 200;

/// Force-directed nearest-neighbour embedder.
#[derive(Clone, Debug)]
pub struct ForceLayoutEmbedder {
	/// Number of simulation steps to run.
	pub steps: usize,
	/// Simulated seconds per step.
	pub dt: f32,
}

impl Default for ForceLayoutEmbedder {
	fn default() -> Self {
		Self {
			steps: 400,
			dt: 0.016,
		}
	}
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
	a.iter()
		.zip(b)
		.map(|(x, y)| (x - y) * (x - y))
		.sum::<f64>()
		.sqrt()
}

/// Undirected k-NN edge list, each pair stored once as `(low, high)`.
fn knn_edges(matrix: &[Vec<f64>], k: usize) -> Vec<(usize, usize)> {
	let mut seen = HashSet::new();
	let mut edges = Vec::new();

	for (i, row) in matrix.iter().enumerate() {
		let mut others: Vec<(usize, f64)> = matrix
			.iter()
			.enumerate()
			.filter(|&(j, _)| j != i)
			.map(|(j, other)| (j, distance(row, other)))
			.collect();
		others.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

		for &(j, _) in others.iter().take(k) {
			let pair = (i.min(j), i.max(j));
			if seen.insert(pair) {
				edges.push(pair);
			}
		}
	}
	edges
}

/// Rescale points so the larger extent spans `[-spread, spread]`, centred on
/// the origin.
fn normalize(points: &mut [(f64, f64)], spread: f64) {
	let (mut min_x, mut max_x, mut min_y, mut max_y) = (
		f64::INFINITY,
		f64::NEG_INFINITY,
		f64::INFINITY,
		f64::NEG_INFINITY,
	);
	for &(x, y) in points.iter() {
		min_x = min_x.min(x);
		max_x = max_x.max(x);
		min_y = min_y.min(y);
		max_y = max_y.max(y);
	}
	let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
	let half = ((max_x - min_x).max(max_y - min_y) / 2.0).max(f64::EPSILON);
	for p in points.iter_mut() {
		p.0 = (p.0 - cx) / half * spread;
		p.1 = (p.1 - cy) / half * spread;
	}
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
	a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Remove the components of `v` along each of the unit vectors in `basis`.
fn orthogonalize(v: &mut [f64], basis: &[Vec<f64>]) {
	for axis in basis {
		let along = dot(v, axis);
		for (x, a) in v.iter_mut().zip(axis) {
			*x -= along * a;
		}
	}
}

/// Unit eigenvector of the largest eigenvalue of `cov` orthogonal to
/// `basis`, found by power iteration. Zeros when no variance is left.
///
/// The sign is fixed so the largest-magnitude component is positive.
fn dominant_axis(cov: &[Vec<f64>], basis: &[Vec<f64>]) -> Vec<f64> {
	let dims = cov.len();
	let trace: f64 = (0..dims).map(|i| cov[i][i]).sum();
	let tolerance = 1e-12 * trace;
	let mut v: Vec<f64> = (0..dims).map(|j| 1.0 / (j + 1) as f64).collect();

	for _ in 0..POWER_ITERATIONS {
		orthogonalize(&mut v, basis);
		let mut next: Vec<f64> = cov.iter().map(|row| dot(row, &v)).collect();
		orthogonalize(&mut next, basis);
		let norm = dot(&next, &next).sqrt();
		if norm.is_nan() || norm <= tolerance {
			return vec![0.0; dims];
		}
		v = next.into_iter().map(|x| x / norm).collect();
	}

	let lead = v
		.iter()
		.copied()
		.max_by(|a, b| a.abs().total_cmp(&b.abs()))
		.unwrap_or(0.0);
	if lead < 0.0 {
		v.iter_mut().for_each(|x| *x = -*x);
	}
	v
}

/// Projection of every row onto the two principal axes, scaled so the
/// larger extent spans `[-START_RADIUS, START_RADIUS]`.
fn principal_layout(matrix: &[Vec<f64>]) -> Vec<(f64, f64)> {
	let dims = matrix.first().map_or(0, Vec::len);
	let n = matrix.len() as f64;
	let mean: Vec<f64> = (0..dims)
		.map(|j| matrix.iter().map(|row| row[j]).sum::<f64>() / n)
		.collect();
	let centred: Vec<Vec<f64>> = matrix
		.iter()
		.map(|row| row.iter().zip(&mean).map(|(x, m)| x - m).collect())
		.collect();

	let mut cov = vec![vec![0.0; dims]; dims];
	for row in &centred {
		for (a, cov_row) in cov.iter_mut().enumerate() {
			for (b, cell) in cov_row.iter_mut().enumerate() {
				*cell += row[a] * row[b];
			}
		}
	}

	let first = dominant_axis(&cov, &[]);
	let second = dominant_axis(&cov, std::slice::from_ref(&first));

	let mut points: Vec<(f64, f64)> = centred
		.iter()
		.map(|row| (dot(row, &first), dot(row, &second)))
		.collect();
	normalize(&mut points, START_RADIUS);
	points
}

impl Embedder for ForceLayoutEmbedder {
	fn fit(&self, matrix: &[Vec<f64>], config: &EmbeddingConfig) -> Result<Vec<Vec<f64>>, ChartError> {
		if config.output_dims != 2 {
			return Err(ChartError::EmbeddingUnavailable(format!(
				"only 2 output dimensions are supported, got {}",
				config.output_dims
			)));
		}
		if matrix.len() < 2 || config.neighbors == 0 {
			return Err(ChartError::EmbeddingUnavailable(format!(
				"{} rows is too few for a neighbour graph",
				matrix.len()
			)));
		}
		if matrix.iter().flatten().any(|v| !v.is_finite()) {
			return Err(ChartError::EmbeddingUnavailable(
				"matrix contains non-numeric values".into(),
			));
		}

		let charge = BASE_CHARGE * (config.min_distance / DEFAULT_MIN_DISTANCE) as f32;
		let mut graph: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
			force_charge: charge,
			force_spring: 0.05,
			force_max: 10.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		// Anchors are massless, so they hold a record near its projected
		// position without repelling anything.
		let nodes: Vec<DefaultNodeIdx> = principal_layout(matrix)
			.into_iter()
			.enumerate()
			.map(|(i, (x, y))| {
				let node = graph.add_node(NodeData {
					x: x as f32,
					y: y as f32,
					mass: 1.0,
					is_anchor: false,
					user_data: i,
				});
				let anchor = graph.add_node(NodeData {
					x: x as f32,
					y: y as f32,
					mass: 0.0,
					is_anchor: true,
					user_data: i,
				});
				graph.add_edge(node, anchor, EdgeData::default());
				node
			})
			.collect();

		for (a, b) in knn_edges(matrix, config.neighbors) {
			graph.add_edge(nodes[a], nodes[b], EdgeData::default());
		}

		for _ in 0..self.steps {
			graph.update(self.dt);
		}

		let mut points = vec![(0.0, 0.0); nodes.len()];
		graph.visit_nodes(|node| {
			if !node.data.is_anchor {
				points[node.data.user_data] = (node.x() as f64, node.y() as f64);
			}
		});

		if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
			return Err(ChartError::EmbeddingUnavailable("layout diverged".into()));
		}

		normalize(&mut points, config.spread);
		Ok(points.into_iter().map(|(x, y)| vec![x, y]).collect())
	}
}
