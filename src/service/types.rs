// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Typed parameter and payload shapes for the command catalog. Wire field
//! names are camelCase.

use serde::{Deserialize, Serialize};

use crate::model::{DataFamily, Multiplicity, ObservableValue};

#[derive(Debug, Clone, Deserialize)]
pub struct AddComponentParams {
    #[serde(rename = "type")]
    pub component_type: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddComponentResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectParams {
    pub source_id: String,
    pub target_id: String,
    pub source_param: Option<String>,
    pub source_param_index: Option<usize>,
    pub target_param: Option<String>,
    pub target_param_index: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    pub source_id: String,
    pub source_param: String,
    pub target_id: String,
    pub target_param: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentIdParams {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSourceInfo {
    pub source_id: String,
    pub source_slot: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotInfo {
    pub name: String,
    pub nickname: String,
    pub family: DataFamily,
    pub multiplicity: Multiplicity,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SlotSourceInfo>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInfoResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub nickname: String,
    pub x: f64,
    pub y: f64,
    pub inputs: Vec<SlotInfo>,
    pub outputs: Vec<SlotInfo>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub nickname: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfoResponse {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub count: usize,
    pub nodes: Vec<NodeSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    pub name: String,
    pub nickname: String,
    pub category: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub matches: Vec<SearchMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentParametersParams {
    #[serde(rename = "type")]
    pub component_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentParametersResponse {
    #[serde(rename = "type")]
    pub component_type: String,
    pub inputs: Vec<SlotInfo>,
    pub outputs: Vec<SlotInfo>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateConnectionResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_param: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatternParams {
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatternResponse {
    pub pattern: String,
    pub node_count: usize,
    pub edge_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatternsParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSummary {
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub node_count: usize,
    pub edge_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternsResponse {
    pub patterns: Vec<PatternSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertConnectionParams {
    pub source_id: String,
    pub target_id: String,
    pub source_param: Option<String>,
    pub target_param: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssertCountParams {
    pub expected: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentHashResponse {
    pub hash: String,
    pub count: usize,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetValueParams {
    pub id: String,
    pub value: ObservableValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetValueResponse {
    pub id: String,
    pub value: ObservableValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveComponentResponse {
    pub id: String,
}
