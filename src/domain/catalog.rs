//! operation 식별자 → 시스템 프롬프트/응답 필드 매핑(PromptCatalog).

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use super::personas;

/// 한 operation의 고정 프롬프트 사양.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub operation_id: String,
    pub system_prompt: String,
    /// 성공 응답 JSON에서 결과 텍스트를 담을 키
    pub response_field: String,
}

impl PromptSpec {
    pub fn new(
        operation_id: impl Into<String>,
        system_prompt: impl Into<String>,
        response_field: impl Into<String>,
    ) -> Self {
        Self {
            operation_id: operation_id.into(),
            system_prompt: system_prompt.into(),
            response_field: response_field.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate operation id: {0}")]
    DuplicateOperation(String),
    #[error("operation id must not be empty")]
    EmptyOperation,
    #[error("response field must not be empty for operation {0}")]
    EmptyResponseField(String),
    #[error("prompt override for unknown operation: {0}")]
    UnknownOverride(String),
}

/// 시작 시 한 번 구성되고 이후 변경되지 않는 프롬프트 카탈로그.
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    specs: Vec<PromptSpec>,
    index: HashMap<String, usize>,
}

impl PromptCatalog {
    /// 중복/빈 식별자를 거부하며 카탈로그를 만든다.
    pub fn new(specs: Vec<PromptSpec>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(specs.len());
        for (pos, spec) in specs.iter().enumerate() {
            if spec.operation_id.trim().is_empty() {
                return Err(CatalogError::EmptyOperation);
            }
            if spec.response_field.trim().is_empty() {
                return Err(CatalogError::EmptyResponseField(spec.operation_id.clone()));
            }
            if index.insert(spec.operation_id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateOperation(spec.operation_id.clone()));
            }
        }
        Ok(Self { specs, index })
    }

    /// 배포에 포함된 기본 persona 카탈로그.
    pub fn builtin() -> Self {
        let specs = personas::builtin_specs();
        let index = specs
            .iter()
            .enumerate()
            .map(|(pos, spec)| (spec.operation_id.clone(), pos))
            .collect();
        Self { specs, index }
    }

    /// 설정의 프롬프트 override를 반영한 새 카탈로그를 만든다.
    /// 응답 필드 이름은 바꿀 수 없다.
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<String, String>,
    ) -> Result<Self, CatalogError> {
        for (operation_id, prompt) in overrides {
            let Some(&pos) = self.index.get(operation_id) else {
                return Err(CatalogError::UnknownOverride(operation_id.clone()));
            };
            self.specs[pos].system_prompt = prompt.clone();
        }
        Ok(self)
    }

    pub fn lookup(&self, operation_id: &str) -> Option<&PromptSpec> {
        self.index.get(operation_id).map(|&pos| &self.specs[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PromptSpec> {
        self.specs.iter()
    }

    pub fn operation_ids(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.operation_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
