//! Fixed text used by the document builders.

use serde::{Deserialize, Serialize};

/// Label language preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English labels
    #[default]
    English,
    /// Simplified Chinese labels
    Chinese,
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "zh" | "cn" | "chinese" => Ok(Language::Chinese),
            other => Err(format!("unknown language: {}", other)),
        }
    }
}

/// Every caption, heading and header cell the builders write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub document_suffix: String,
    pub database_suffix: String,
    pub version_prefix: String,
    pub document_info: String,
    pub document_name: String,
    pub generated_at: String,
    pub document_version: String,
    pub unnamed_operation: String,
    pub untagged: String,

    pub path: String,
    pub method: String,
    pub operation_id: String,
    pub consumes: String,
    pub produces: String,
    pub deprecated: String,
    pub tags: String,
    pub description: String,

    pub request_parameters: String,
    pub param_name: String,
    pub param_location: String,
    pub param_type: String,
    pub required: String,
    pub param_description: String,
    pub example: String,

    pub responses: String,
    pub status_code: String,
    pub response_description: String,
    pub schema: String,
    pub schema_fallback: String,

    pub field_name: String,
    pub field_type: String,
    pub field_description: String,
    pub allowed_values: String,
    pub collection_format: String,

    pub yes: String,
    pub no: String,

    pub summary_sheet: String,
    pub group: String,
    pub other_group: String,
    pub table_name: String,
    pub collation: String,
    pub engine: String,
    pub column_name: String,
    pub column_type: String,
    pub nullable: String,
    pub default_value: String,
    pub primary_key: String,
}

impl Labels {
    /// Labels for a language preset.
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::English => Self::english(),
            Language::Chinese => Self::chinese(),
        }
    }

    /// English preset.
    pub fn english() -> Self {
        Self {
            document_suffix: "API Documentation".into(),
            database_suffix: "Database Documentation".into(),
            version_prefix: "Version: ".into(),
            document_info: "Document Information".into(),
            document_name: "Document Name".into(),
            generated_at: "Generated At".into(),
            document_version: "Document Version".into(),
            unnamed_operation: "Unnamed operation".into(),
            untagged: "Untagged".into(),

            path: "Path".into(),
            method: "Method".into(),
            operation_id: "Operation ID".into(),
            consumes: "Consumes".into(),
            produces: "Produces".into(),
            deprecated: "Deprecated".into(),
            tags: "Tags".into(),
            description: "Description".into(),

            request_parameters: "Request Parameters".into(),
            param_name: "Name".into(),
            param_location: "Location".into(),
            param_type: "Type".into(),
            required: "Required".into(),
            param_description: "Description".into(),
            example: "Example".into(),

            responses: "Responses".into(),
            status_code: "Status Code".into(),
            response_description: "Description".into(),
            schema: "Schema".into(),
            schema_fallback: "Schema".into(),

            field_name: "Field".into(),
            field_type: "Type".into(),
            field_description: "Description".into(),
            allowed_values: "Allowed values".into(),
            collection_format: "Collection format".into(),

            yes: "Yes".into(),
            no: "No".into(),

            summary_sheet: "Summary".into(),
            group: "Group".into(),
            other_group: "Other".into(),
            table_name: "Table Name".into(),
            collation: "Collation".into(),
            engine: "Engine".into(),
            column_name: "Column".into(),
            column_type: "Type".into(),
            nullable: "Nullable".into(),
            default_value: "Default".into(),
            primary_key: "PK".into(),
        }
    }

    /// Simplified Chinese preset.
    pub fn chinese() -> Self {
        Self {
            document_suffix: "API接口文档".into(),
            database_suffix: "数据库文档".into(),
            version_prefix: "版本：".into(),
            document_info: "文档信息".into(),
            document_name: "文档名称".into(),
            generated_at: "生成时间".into(),
            document_version: "文档版本".into(),
            unnamed_operation: "未命名接口".into(),
            untagged: "未分组".into(),

            path: "接口地址".into(),
            method: "请求方式".into(),
            operation_id: "操作ID".into(),
            consumes: "消费类型".into(),
            produces: "生产类型".into(),
            deprecated: "是否废弃".into(),
            tags: "标签".into(),
            description: "接口描述".into(),

            request_parameters: "请求参数".into(),
            param_name: "参数名称".into(),
            param_location: "参数位置".into(),
            param_type: "参数类型".into(),
            required: "是否必需".into(),
            param_description: "参数描述".into(),
            example: "示例值".into(),

            responses: "响应结果".into(),
            status_code: "状态码".into(),
            response_description: "描述".into(),
            schema: "数据结构".into(),
            schema_fallback: "数据结构".into(),

            field_name: "字段名称".into(),
            field_type: "字段类型".into(),
            field_description: "字段描述".into(),
            allowed_values: "可选值".into(),
            collection_format: "集合格式".into(),

            yes: "是".into(),
            no: "否".into(),

            summary_sheet: "摘要".into(),
            group: "分组".into(),
            other_group: "其他".into(),
            table_name: "表名称".into(),
            collation: "字符集".into(),
            engine: "存储引擎".into(),
            column_name: "列名".into(),
            column_type: "类型".into(),
            nullable: "是否为空".into(),
            default_value: "缺省值".into(),
            primary_key: "主键".into(),
        }
    }

    /// `yes`/`no` label for a flag.
    pub fn flag(&self, value: bool) -> &str {
        if value {
            &self.yes
        } else {
            &self.no
        }
    }

    /// Full API document title for a project.
    pub fn document_title(&self, project: &str) -> String {
        join_title(project, &self.document_suffix)
    }

    /// Full database document title for a project.
    pub fn database_title(&self, project: &str) -> String {
        join_title(project, &self.database_suffix)
    }
}

// CJK suffixes attach without a space.
fn join_title(project: &str, suffix: &str) -> String {
    if suffix.is_ascii() {
        format!("{} {}", project, suffix)
    } else {
        format!("{}{}", project, suffix)
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}
