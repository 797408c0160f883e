//! Force-directed layout algorithm
//!
//! Nodes repel each other like charged particles while edges act as springs
//! with a rest length. A centering force keeps the system from drifting and
//! a cooling temperature caps how far any node may move per step, so the
//! simulation settles instead of oscillating.
//!
//! The loop runs to completion on the calling thread; there is no
//! cancellation point between iterations.

use std::f32::consts::TAU;

use log::{debug, trace};
use rand::Rng;

use arrange_core::{geometry::Point, graph::NodeKind};

use crate::{
    config::{AlgorithmOptions, LayoutConfig},
    error::LayoutError,
    layout::algorithm::{LayoutAlgorithm, LayoutRng, Placement},
    structure::LayoutGraph,
};

const ITERATIONS: &str = "iterations";
const SPRING_LENGTH: &str = "spring_length";
const SPRING_STRENGTH: &str = "spring_strength";
const REPULSION_STRENGTH: &str = "repulsion_strength";
const DAMPING: &str = "damping";
const TIME_STEP: &str = "time_step";
const CENTER_FORCE: &str = "center_force";
const INITIAL_TEMPERATURE: &str = "initial_temperature";
const COOLING_FACTOR: &str = "cooling_factor";

/// Initial placement radius per square root of the node count.
const RADIUS_PER_SQRT_NODE: f32 = 50.0;
/// Maximum initial offset applied to each coordinate.
const INITIAL_JITTER: f32 = 5.0;
const MIN_TEMPERATURE: f32 = 1.0;
const MIN_KINETIC_ENERGY: f32 = 0.1;

/// Tunable parameters of the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParameters {
    pub iterations: usize,
    pub spring_length: f32,
    pub spring_strength: f32,
    pub repulsion_strength: f32,
    pub damping: f32,
    pub time_step: f32,
    pub center_force: f32,
    pub initial_temperature: f32,
    pub cooling_factor: f32,
}

impl Default for ForceParameters {
    fn default() -> Self {
        Self {
            iterations: 300,
            spring_length: 100.0,
            spring_strength: 0.1,
            repulsion_strength: 1000.0,
            damping: 0.9,
            time_step: 1.0,
            center_force: 0.01,
            initial_temperature: 100.0,
            cooling_factor: 0.95,
        }
    }
}

impl ForceParameters {
    /// Returns a copy with every parameter present in `options` overridden.
    pub fn merged(mut self, options: &AlgorithmOptions) -> Self {
        if let Some(iterations) = options.get_usize(ITERATIONS) {
            self.iterations = iterations;
        }
        let overrides = [
            (SPRING_LENGTH, &mut self.spring_length),
            (SPRING_STRENGTH, &mut self.spring_strength),
            (REPULSION_STRENGTH, &mut self.repulsion_strength),
            (DAMPING, &mut self.damping),
            (TIME_STEP, &mut self.time_step),
            (CENTER_FORCE, &mut self.center_force),
            (INITIAL_TEMPERATURE, &mut self.initial_temperature),
            (COOLING_FACTOR, &mut self.cooling_factor),
        ];
        for (key, slot) in overrides {
            if let Some(value) = options.get(key) {
                *slot = value;
            }
        }
        self
    }

    /// Parameters as an option bag, keyed the way [`Self::merged`] reads them.
    pub fn to_options(&self) -> AlgorithmOptions {
        AlgorithmOptions::new()
            .with(ITERATIONS, self.iterations as f32)
            .with(SPRING_LENGTH, self.spring_length)
            .with(SPRING_STRENGTH, self.spring_strength)
            .with(REPULSION_STRENGTH, self.repulsion_strength)
            .with(DAMPING, self.damping)
            .with(TIME_STEP, self.time_step)
            .with(CENTER_FORCE, self.center_force)
            .with(INITIAL_TEMPERATURE, self.initial_temperature)
            .with(COOLING_FACTOR, self.cooling_factor)
    }
}

/// Simulation mass of a node; heavier nodes move less.
fn node_mass(kind: NodeKind) -> f32 {
    match kind {
        NodeKind::Start | NodeKind::End => 2.0,
        NodeKind::Condition => 1.5,
        _ => 1.0,
    }
}

/// Per-node state while the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSimulationState {
    pub position: Point,
    pub velocity: Point,
    pub force: Point,
    pub mass: f32,
    /// Pinned nodes accumulate forces but never move.
    pub pinned: bool,
}

impl NodeSimulationState {
    fn new(position: Point, mass: f32, pinned: bool) -> Self {
        Self {
            position,
            velocity: Point::default(),
            force: Point::default(),
            mass,
            pinned,
        }
    }

    fn kinetic_energy(&self) -> f32 {
        let speed = self.velocity.hypot();
        0.5 * self.mass * speed * speed
    }
}

/// Progress of a single simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationPhase {
    Initializing,
    Iterating,
    Converged,
    MaxIterationsReached,
}

/// Physics-based layout for graphs without an obvious hierarchy.
#[derive(Debug, Clone, Default)]
pub struct ForceDirectedLayout {
    defaults: ForceParameters,
}

impl ForceDirectedLayout {
    /// Registry name of this algorithm.
    pub const NAME: &'static str = "force-directed";

    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the parameters used when a configuration does not override them.
    pub fn with_parameters(mut self, parameters: ForceParameters) -> Self {
        self.defaults = parameters;
        self
    }

    pub fn parameters(&self) -> &ForceParameters {
        &self.defaults
    }

    fn initialize(
        &self,
        graph: &LayoutGraph<'_>,
        config: &LayoutConfig,
        rng: &mut LayoutRng,
    ) -> Vec<NodeSimulationState> {
        let count = graph.node_count();
        let radius = (count as f32).sqrt() * RADIUS_PER_SQRT_NODE;

        graph
            .nodes()
            .enumerate()
            .map(|(i, (id, node))| {
                let mass = node_mass(node.kind());
                if config.is_pinned(id) {
                    return NodeSimulationState::new(node.position().finite_or_zero(), mass, true);
                }
                let angle = TAU * i as f32 / count as f32;
                let jitter = Point::new(
                    rng.random_range(-INITIAL_JITTER..INITIAL_JITTER),
                    rng.random_range(-INITIAL_JITTER..INITIAL_JITTER),
                );
                let on_circle = Point::new(radius * angle.cos(), radius * angle.sin());
                NodeSimulationState::new(on_circle.add_point(jitter), mass, false)
            })
            .collect()
    }

    /// Runs the simulation, returning the number of iterations performed.
    fn simulate(
        &self,
        states: &mut [NodeSimulationState],
        springs: &[(usize, usize)],
        params: &ForceParameters,
    ) -> usize {
        let mut phase = SimulationPhase::Iterating;
        let mut temperature = params.initial_temperature;
        let mut performed = 0;

        for iteration in 0..params.iterations {
            performed = iteration + 1;

            for state in states.iter_mut() {
                state.force = Point::default();
            }
            apply_repulsion(states, params.repulsion_strength);
            apply_springs(states, springs, params.spring_length, params.spring_strength);
            apply_centering(states, params.center_force);

            let mut kinetic_energy = 0.0;
            for state in states.iter_mut().filter(|state| !state.pinned) {
                let acceleration = state.force.scale(params.time_step / state.mass);
                let mut velocity = state.velocity.add_point(acceleration).scale(params.damping);
                let speed = velocity.hypot();
                if speed > temperature {
                    velocity = velocity.scale(temperature / speed);
                }
                state.velocity = velocity;
                state.position = state.position.add_point(velocity.scale(params.time_step));
                kinetic_energy += state.kinetic_energy();
            }

            temperature *= params.cooling_factor;

            if temperature < MIN_TEMPERATURE || kinetic_energy < MIN_KINETIC_ENERGY {
                phase = SimulationPhase::Converged;
                trace!(
                    iteration = performed,
                    temperature = temperature,
                    kinetic_energy = kinetic_energy;
                    "Force simulation converged"
                );
                break;
            }
        }

        if phase == SimulationPhase::Iterating {
            phase = SimulationPhase::MaxIterationsReached;
        }
        debug!(phase:? = phase, iterations = performed; "Force simulation finished");
        performed
    }
}

/// Inverse-square repulsion between every unordered pair of nodes.
fn apply_repulsion(states: &mut [NodeSimulationState], strength: f32) {
    for i in 0..states.len() {
        for j in (i + 1)..states.len() {
            let delta = states[i].position.sub_point(states[j].position);
            let distance = delta.hypot();
            if distance == 0.0 || !distance.is_finite() {
                continue;
            }
            let magnitude = strength / (distance * distance);
            let push = delta.scale(magnitude / distance);
            states[i].force = states[i].force.add_point(push);
            states[j].force = states[j].force.sub_point(push);
        }
    }
}

/// Hooke springs pulling connected nodes toward the rest length.
fn apply_springs(
    states: &mut [NodeSimulationState],
    springs: &[(usize, usize)],
    rest_length: f32,
    strength: f32,
) {
    for &(source, target) in springs {
        if source == target {
            continue;
        }
        let delta = states[target].position.sub_point(states[source].position);
        let distance = delta.hypot();
        if distance == 0.0 || !distance.is_finite() {
            continue;
        }
        let magnitude = strength * (distance - rest_length);
        let pull = delta.scale(magnitude / distance);
        states[source].force = states[source].force.add_point(pull);
        states[target].force = states[target].force.sub_point(pull);
    }
}

/// Pulls every node toward the mass-weighted centroid.
fn apply_centering(states: &mut [NodeSimulationState], strength: f32) {
    let total_mass: f32 = states.iter().map(|state| state.mass).sum();
    if total_mass <= 0.0 {
        return;
    }
    let weighted = states
        .iter()
        .fold(Point::default(), |acc, state| {
            acc.add_point(state.position.scale(state.mass))
        });
    let centroid = weighted.scale(1.0 / total_mass);
    for state in states.iter_mut() {
        let pull = centroid.sub_point(state.position).scale(strength);
        state.force = state.force.add_point(pull);
    }
}

fn check_positive(key: &str, value: f32) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("`{key}` must be a positive number, got {value}"))
    }
}

fn check_count(key: &str, value: f32) -> Result<(), String> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 {
        Ok(())
    } else {
        Err(format!("`{key}` must be a whole number of at least 1, got {value}"))
    }
}

fn check_unit_interval(key: &str, value: f32) -> Result<(), String> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(format!("`{key}` must be within (0, 1], got {value}"))
    }
}

impl LayoutAlgorithm for ForceDirectedLayout {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Physics simulation balancing node repulsion against edge springs"
    }

    fn default_options(&self) -> AlgorithmOptions {
        self.defaults.to_options()
    }

    fn supports_animation(&self) -> bool {
        true
    }

    fn supports_constraints(&self) -> bool {
        true
    }

    fn validate_options(&self, options: &AlgorithmOptions) -> Result<(), String> {
        if let Some(iterations) = options.get(ITERATIONS) {
            check_count(ITERATIONS, iterations)?;
        }
        for key in [SPRING_LENGTH, TIME_STEP] {
            if let Some(value) = options.get(key) {
                check_positive(key, value)?;
            }
        }
        for key in [DAMPING, COOLING_FACTOR] {
            if let Some(value) = options.get(key) {
                check_unit_interval(key, value)?;
            }
        }
        for key in [SPRING_STRENGTH, REPULSION_STRENGTH, CENTER_FORCE, INITIAL_TEMPERATURE] {
            match options.get(key) {
                Some(value) if !(value.is_finite() && value >= 0.0) => {
                    return Err(format!("`{key}` must be a non-negative number, got {value}"));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn compute_positions(
        &self,
        graph: &LayoutGraph<'_>,
        config: &LayoutConfig,
        rng: &mut LayoutRng,
    ) -> Result<Placement, LayoutError> {
        let params = self.defaults.merged(config.options());
        debug!(
            phase:? = SimulationPhase::Initializing,
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Starting force simulation"
        );

        let mut states = self.initialize(graph, config, rng);
        let springs: Vec<(usize, usize)> = graph
            .edges()
            .filter_map(|(_, edge)| {
                Some((graph.node_index(edge.source())?, graph.node_index(edge.target())?))
            })
            .collect();

        let iterations = if states.is_empty() {
            0
        } else {
            self.simulate(&mut states, &springs, &params)
        };

        let positions = graph
            .nodes()
            .zip(&states)
            .map(|((id, _), state)| (id.to_string(), state.position))
            .collect();
        Ok(Placement::new(positions, iterations))
    }
}
