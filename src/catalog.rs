//! Algorithms and reward distributions known to the simulator, with their
//! tunable parameters. Served as-is to clients building simulation requests.

use serde::Serialize;

pub const DEFAULT_P: f64 = 0.5;
pub const DEFAULT_MEAN: f64 = 0.0;
pub const DEFAULT_STDDEV: f64 = 1.0;
pub const DEFAULT_EPSILON: f64 = 0.1;
pub const DEFAULT_C: f64 = 1.414;

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Float,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParameterDefinition {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub default: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct VariantDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub params: Vec<ParameterDefinition>,
}

fn float(
    id: &'static str,
    name: &'static str,
    min: Option<f64>,
    max: Option<f64>,
    default: f64,
) -> ParameterDefinition {
    ParameterDefinition {
        id,
        name,
        kind: ParameterKind::Float,
        min,
        max,
        default,
    }
}

pub fn algorithms() -> Vec<VariantDefinition> {
    vec![
        VariantDefinition {
            id: "epsilon_greedy",
            name: "Epsilon-Greedy",
            params: vec![float(
                "epsilon",
                "Epsilon",
                Some(0.0),
                Some(1.0),
                DEFAULT_EPSILON,
            )],
        },
        VariantDefinition {
            id: "ucb1",
            name: "UCB1",
            params: vec![float(
                "c",
                "Exploration Constant",
                Some(0.0),
                None,
                DEFAULT_C,
            )],
        },
        VariantDefinition {
            id: "thompson_sampling",
            name: "Thompson Sampling",
            params: vec![],
        },
    ]
}

pub fn distributions() -> Vec<VariantDefinition> {
    vec![
        VariantDefinition {
            id: "bernoulli",
            name: "Bernoulli",
            params: vec![float(
                "p",
                "Probability (p)",
                Some(0.0),
                Some(1.0),
                DEFAULT_P,
            )],
        },
        VariantDefinition {
            id: "gaussian",
            name: "Gaussian",
            params: vec![
                float("mean", "Mean", None, None, DEFAULT_MEAN),
                // strictly positive, not expressible as an inclusive min
                float("stddev", "Standard Deviation", None, None, DEFAULT_STDDEV),
            ],
        },
    ]
}
