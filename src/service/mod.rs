// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! The graph command service: one handler per catalog command, all document
//! work marshaled through the executor.

mod executor;
mod registry;
pub mod types;

pub use executor::{DocumentExecutor, ExecutorError};
pub use registry::{CommandRegistry, Handler, HandlerFuture};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::doc::GraphDocument;
use crate::engine::{self, ConnectionSpec, EngineError, SlotRef};
use crate::model::{catalog, NodeId, SlotDescriptor};
use crate::pattern;
use crate::resolve;
use crate::verify;

use types::*;

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    Engine(EngineError),
    InvalidParams(String),
    NoMatchingPattern(String),
    Timeout,
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(err) => err.fmt(f),
            Self::InvalidParams(message) => write!(f, "invalid parameters: {message}"),
            Self::NoMatchingPattern(text) => {
                write!(f, "no pattern matches description '{text}'")
            }
            Self::Timeout => f.write_str("operation timed out waiting for the document"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<EngineError> for ServiceError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl From<ExecutorError> for ServiceError {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::TimedOut => Self::Timeout,
            ExecutorError::Failed | ExecutorError::Stopped => Self::Internal(err.to_string()),
        }
    }
}

fn parse<T: DeserializeOwned>(params: Map<String, Value>) -> Result<T, ServiceError> {
    serde_json::from_value(Value::Object(params))
        .map_err(|err| ServiceError::InvalidParams(err.to_string()))
}

fn to_value<T: Serialize>(payload: T) -> Result<Value, ServiceError> {
    serde_json::to_value(payload).map_err(|err| ServiceError::Internal(err.to_string()))
}

fn parse_node_id(raw: &str) -> Result<NodeId, ServiceError> {
    NodeId::from_str(raw).map_err(|err| ServiceError::InvalidParams(err.to_string()))
}

/// At most one of name/index per side.
fn slot_ref(
    side: &str,
    name: Option<String>,
    index: Option<usize>,
) -> Result<Option<SlotRef>, ServiceError> {
    match (name, index) {
        (Some(_), Some(_)) => Err(ServiceError::InvalidParams(format!(
            "{side} accepts a name or an index, not both"
        ))),
        (Some(name), None) => Ok(Some(SlotRef::Name(name))),
        (None, Some(index)) => Ok(Some(SlotRef::Index(index))),
        (None, None) => Ok(None),
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn slot_info(descriptor: &SlotDescriptor, sources: Option<Vec<SlotSourceInfo>>) -> SlotInfo {
    SlotInfo {
        name: descriptor.name.clone(),
        nickname: descriptor.nickname.clone(),
        family: descriptor.family,
        multiplicity: descriptor.multiplicity,
        optional: descriptor.optional,
        sources,
    }
}

pub struct GraphService {
    executor: DocumentExecutor,
}

impl GraphService {
    pub fn new(executor: DocumentExecutor) -> Arc<Self> {
        Arc::new(Self { executor })
    }

    async fn add_component(&self, params: Map<String, Value>) -> Result<Value, ServiceError> {
        let p: AddComponentParams = parse(params)?;
        let (x, y) = (p.x, p.y);
        let (id, component_type) = self
            .executor
            .run(move |doc| engine::create_node(doc, &p.component_type, x, y))
            .await??;
        to_value(AddComponentResponse {
            id: id.to_string(),
            component_type,
            x,
            y,
        })
    }

    async fn connect_components(&self, params: Map<String, Value>) -> Result<Value, ServiceError> {
        let p: ConnectParams = parse(params)?;
        let spec = ConnectionSpec {
            source: parse_node_id(&p.source_id)?,
            target: parse_node_id(&p.target_id)?,
            source_slot: slot_ref("sourceParam", p.source_param, p.source_param_index)?,
            target_slot: slot_ref("targetParam", p.target_param, p.target_param_index)?,
        };
        let resolved = self
            .executor
            .run(move |doc| engine::connect(doc, &spec))
            .await??;
        to_value(ConnectResponse {
            source_id: p.source_id,
            source_param: resolved.source_slot,
            target_id: p.target_id,
            target_param: resolved.target_slot,
        })
    }

    async fn validate_connection(&self, params: Map<String, Value>) -> Result<Value, ServiceError> {
        let p: ConnectParams = parse(params)?;
        let spec = ConnectionSpec {
            source: parse_node_id(&p.source_id)?,
            target: parse_node_id(&p.target_id)?,
            source_slot: slot_ref("sourceParam", p.source_param, p.source_param_index)?,
            target_slot: slot_ref("targetParam", p.target_param, p.target_param_index)?,
        };
        let outcome = self
            .executor
            .run(move |doc| engine::validate_connection(doc, &spec))
            .await?;
        let response = match outcome {
            Ok(resolved) => ValidateConnectionResponse {
                valid: true,
                reason: None,
                source_param: Some(resolved.source_slot),
                target_param: Some(resolved.target_slot),
            },
            Err(err) => ValidateConnectionResponse {
                valid: false,
                reason: Some(err.to_string()),
                source_param: None,
                target_param: None,
            },
        };
        to_value(response)
    }

    async fn get_component_info(&self, params: Map<String, Value>) -> Result<Value, ServiceError> {
        let p: ComponentIdParams = parse(params)?;
        let id = parse_node_id(&p.id)?;
        let response = self
            .executor
            .run(move |doc| component_info(doc, id))
            .await??;
        to_value(response)
    }

    async fn get_document_info(&self, params: Map<String, Value>) -> Result<Value, ServiceError> {
        let _ = params;
        let response = self
            .executor
            .run(|doc| {
                let mut ids = doc.node_ids();
                ids.sort();
                let nodes = ids
                    .iter()
                    .filter_map(|id| doc.node_info(*id))
                    .map(|info| NodeSummary {
                        id: info.id.to_string(),
                        component_type: info.type_name,
                        nickname: info.nickname,
                    })
                    .collect::<Vec<_>>();
                DocumentInfoResponse {
                    name: doc.document_name(),
                    path: doc.document_path(),
                    count: nodes.len(),
                    nodes,
                }
            })
            .await?;
        to_value(response)
    }

    async fn clear_document(&self, params: Map<String, Value>) -> Result<Value, ServiceError> {
        let _ = params;
        let removed = self.executor.run(|doc| engine::clear_document(doc)).await?;
        tracing::info!(removed, "cleared document");
        Ok(json!({}))
    }

    async fn remove_component(&self, params: Map<String, Value>) -> Result<Value, ServiceError> {
        let p: ComponentIdParams = parse(params)?;
        let id = parse_node_id(&p.id)?;
        self.executor
            .run(move |doc| engine::remove_node(doc, id))
            .await??;
        to_value(RemoveComponentResponse { id: p.id })
    }

    async fn set_component_value(&self, params: Map<String, Value>) -> Result<Value, ServiceError> {
        let p: SetValueParams = parse(params)?;
        let id = parse_node_id(&p.id)?;
        let value = p.value.clone();
        self.executor
            .run(move |doc| {
                if doc.node_info(id).is_none() {
                    return Err(EngineError::NodeNotFound(id));
                }
                doc.set_observable_value(id, value);
                Ok(())
            })
            .await??;
        to_value(SetValueResponse {
            id: p.id,
            value: p.value,
        })
    }

    async fn search_components(&self, params: Map<String, Value>) -> Result<Value, ServiceError> {
        let p: SearchParams = parse(params)?;
        let resolved = resolve::resolve_component_type(&p.query);
        let mut matches = catalog::all()
            .iter()
            .map(|component| {
                let mut score = resolve::search_score(&p.query, &component.name)
                    .max(resolve::search_score(&p.query, &component.nickname));
                if component.name == resolved {
                    score += 100.0;
                }
                SearchMatch {
                    name: component.name.clone(),
                    nickname: component.nickname.clone(),
                    category: component.category.clone(),
                    score,
                }
            })
            .filter(|m| m.score >= 60.0)
            .collect::<Vec<_>>();
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        matches.truncate(10);
        to_value(SearchResponse { matches })
    }

    async fn get_component_parameters(
        &self,
        params: Map<String, Value>,
    ) -> Result<Value, ServiceError> {
        let p: ComponentParametersParams = parse(params)?;
        let resolved = resolve::resolve_component_type(&p.component_type);
        let component = catalog::find(&resolved)
            .ok_or_else(|| EngineError::UnknownNodeType(p.component_type.clone()))?;
        to_value(ComponentParametersResponse {
            component_type: component.name.clone(),
            inputs: component.inputs.iter().map(|slot| slot_info(slot, None)).collect(),
            outputs: component.outputs.iter().map(|slot| slot_info(slot, None)).collect(),
        })
    }

    async fn create_pattern(&self, params: Map<String, Value>) -> Result<Value, ServiceError> {
        let p: CreatePatternParams = parse(params)?;
        let template = pattern::recognize_intent(&p.description)
            .ok_or_else(|| ServiceError::NoMatchingPattern(p.description.clone()))?;

        let (node_count, edge_count) = self
            .executor
            .run(move |doc| instantiate_template(doc, template))
            .await??;
        to_value(CreatePatternResponse {
            pattern: template.name.clone(),
            node_count,
            edge_count,
        })
    }

    async fn get_available_patterns(
        &self,
        params: Map<String, Value>,
    ) -> Result<Value, ServiceError> {
        let p: PatternsParams = parse(params)?;
        let patterns = pattern::search(&p.query)
            .into_iter()
            .map(|template| PatternSummary {
                name: template.name.clone(),
                description: template.description.clone(),
                keywords: template.keywords.clone(),
                node_count: template.nodes.len(),
                edge_count: template.edges.len(),
            })
            .collect::<Vec<_>>();
        to_value(PatternsResponse { patterns })
    }

    async fn export_document_state(
        &self,
        params: Map<String, Value>,
    ) -> Result<Value, ServiceError> {
        let _ = params;
        let snapshot = self.executor.run(|doc| verify::export_state(doc)).await?;
        to_value(snapshot)
    }

    async fn get_document_hash(&self, params: Map<String, Value>) -> Result<Value, ServiceError> {
        let _ = params;
        let (hash, count) = self
            .executor
            .run(|doc| (verify::document_hash(doc), doc.node_ids().len()))
            .await?;
        to_value(DocumentHashResponse {
            hash,
            count,
            timestamp: unix_millis(),
        })
    }

    async fn assert_component_exists(
        &self,
        params: Map<String, Value>,
    ) -> Result<Value, ServiceError> {
        let p: ComponentIdParams = parse(params)?;
        let assertion = self
            .executor
            .run(move |doc| verify::assert_node_exists(doc, &p.id))
            .await?;
        to_value(assertion)
    }

    async fn assert_connection_exists(
        &self,
        params: Map<String, Value>,
    ) -> Result<Value, ServiceError> {
        let p: AssertConnectionParams = parse(params)?;
        let assertion = self
            .executor
            .run(move |doc| {
                verify::assert_edge_exists(
                    doc,
                    &p.source_id,
                    &p.target_id,
                    p.source_param.as_deref(),
                    p.target_param.as_deref(),
                )
            })
            .await?;
        to_value(assertion)
    }

    async fn assert_component_count(
        &self,
        params: Map<String, Value>,
    ) -> Result<Value, ServiceError> {
        let p: AssertCountParams = parse(params)?;
        let assertion = self
            .executor
            .run(move |doc| verify::assert_node_count(doc, p.expected))
            .await?;
        to_value(assertion)
    }
}

fn component_info(
    doc: &dyn GraphDocument,
    id: NodeId,
) -> Result<ComponentInfoResponse, EngineError> {
    let info = doc.node_info(id).ok_or(EngineError::NodeNotFound(id))?;
    let inputs = doc
        .input_slots(id)
        .unwrap_or_default()
        .iter()
        .map(|descriptor| {
            let sources = doc
                .slot_sources(id, &descriptor.name)
                .unwrap_or_default()
                .into_iter()
                .map(|source| SlotSourceInfo {
                    source_id: source.node_id.to_string(),
                    source_slot: source.slot_name,
                })
                .collect::<Vec<_>>();
            slot_info(descriptor, Some(sources))
        })
        .collect();
    let outputs = doc
        .output_slots(id)
        .unwrap_or_default()
        .iter()
        .map(|descriptor| slot_info(descriptor, None))
        .collect();

    Ok(ComponentInfoResponse {
        id: info.id.to_string(),
        component_type: info.type_name,
        nickname: info.nickname,
        x: info.x,
        y: info.y,
        inputs,
        outputs,
    })
}

/// Create a template's nodes and edges in the live document, remapping
/// template-local ids to the freshly minted real ids.
fn instantiate_template(
    doc: &mut dyn GraphDocument,
    template: &pattern::PatternTemplate,
) -> Result<(usize, usize), EngineError> {
    let mut real_ids: BTreeMap<&str, NodeId> = BTreeMap::new();
    for node in &template.nodes {
        let (id, _) = engine::create_node(doc, &node.type_name, node.x, node.y)?;
        if let Some(value) = &node.value {
            doc.set_observable_value(id, value.clone());
        }
        real_ids.insert(node.template_id.as_str(), id);
    }

    for edge in &template.edges {
        // The template catalog only wires declared nodes; a stale entry is
        // caught by the catalog tests, not worth failing the whole pattern.
        let (Some(&source), Some(&target)) = (
            real_ids.get(edge.source.as_str()),
            real_ids.get(edge.target.as_str()),
        ) else {
            continue;
        };
        engine::connect(
            doc,
            &ConnectionSpec {
                source,
                target,
                source_slot: Some(SlotRef::Name(edge.source_slot.clone())),
                target_slot: Some(SlotRef::Name(edge.target_slot.clone())),
            },
        )?;
    }

    Ok((template.nodes.len(), template.edges.len()))
}

/// Populate the registry from the fixed command table.
pub fn build_registry(service: Arc<GraphService>) -> CommandRegistry {
    macro_rules! route {
        ($registry:expr, $name:literal, $method:ident) => {{
            let service = Arc::clone(&service);
            $registry.register(
                $name,
                Arc::new(move |params| {
                    let service = Arc::clone(&service);
                    Box::pin(async move { service.$method(params).await }) as HandlerFuture
                }) as Handler,
            );
        }};
    }

    let mut registry = CommandRegistry::new();
    route!(registry, "add_component", add_component);
    route!(registry, "connect_components", connect_components);
    route!(registry, "validate_connection", validate_connection);
    route!(registry, "get_component_info", get_component_info);
    route!(registry, "get_document_info", get_document_info);
    route!(registry, "clear_document", clear_document);
    route!(registry, "remove_component", remove_component);
    route!(registry, "set_component_value", set_component_value);
    route!(registry, "search_components", search_components);
    route!(registry, "get_component_parameters", get_component_parameters);
    route!(registry, "create_pattern", create_pattern);
    route!(registry, "get_available_patterns", get_available_patterns);
    route!(registry, "export_document_state", export_document_state);
    route!(registry, "get_document_hash", get_document_hash);
    route!(registry, "assert_component_exists", assert_component_exists);
    route!(registry, "assert_connection_exists", assert_connection_exists);
    route!(registry, "assert_component_count", assert_component_count);
    registry
}


#[cfg(test)]
mod e2e;
