//! Static table of the todo tools
//!
//! Field names and required-ness here are what function-calling models see,
//! so they must not drift from the parameter structs in `params`.

use serde_json::{json, Map, Value};
use std::fmt;

/// The closed set of operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    AddTask,
    ListTasks,
    CompleteTask,
    DeleteTask,
    UpdateTask,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::AddTask,
        ToolKind::ListTasks,
        ToolKind::CompleteTask,
        ToolKind::DeleteTask,
        ToolKind::UpdateTask,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::AddTask => "add_task",
            ToolKind::ListTasks => "list_tasks",
            ToolKind::CompleteTask => "complete_task",
            ToolKind::DeleteTask => "delete_task",
            ToolKind::UpdateTask => "update_task",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn descriptor(&self) -> &'static ToolDescriptor {
        match self {
            ToolKind::AddTask => &TOOLS[0],
            ToolKind::ListTasks => &TOOLS[1],
            ToolKind::CompleteTask => &TOOLS[2],
            ToolKind::DeleteTask => &TOOLS[3],
            ToolKind::UpdateTask => &TOOLS[4],
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub description: &'static str,
}

const fn field(
    name: &'static str,
    field_type: FieldType,
    required: bool,
    description: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        field_type,
        required,
        description,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor {
    pub kind: ToolKind,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

pub static TOOLS: [ToolDescriptor; 5] = [
    ToolDescriptor {
        kind: ToolKind::AddTask,
        description: "Creates a new task for a user",
        fields: &[
            field("user_id", FieldType::String, true, "ID of the user creating the task"),
            field("title", FieldType::String, true, "Title of the task"),
            field("description", FieldType::String, false, "Description of the task"),
        ],
    },
    ToolDescriptor {
        kind: ToolKind::ListTasks,
        description: "Lists tasks for a user",
        fields: &[
            field("user_id", FieldType::String, true, "ID of the user whose tasks to list"),
            field("status", FieldType::String, false, "Filter by status (all, active, completed)"),
        ],
    },
    ToolDescriptor {
        kind: ToolKind::CompleteTask,
        description: "Marks a task as completed",
        fields: &[
            field("user_id", FieldType::String, true, "ID of the user"),
            field("task_id", FieldType::Integer, true, "ID of the task to complete"),
        ],
    },
    ToolDescriptor {
        kind: ToolKind::DeleteTask,
        description: "Deletes a task",
        fields: &[
            field("user_id", FieldType::String, true, "ID of the user"),
            field("task_id", FieldType::Integer, true, "ID of the task to delete"),
        ],
    },
    ToolDescriptor {
        kind: ToolKind::UpdateTask,
        description: "Updates task details",
        fields: &[
            field("user_id", FieldType::String, true, "ID of the user"),
            field("task_id", FieldType::Integer, true, "ID of the task to update"),
            field("title", FieldType::String, false, "New title for the task"),
            field("description", FieldType::String, false, "New description for the task"),
        ],
    },
];

impl ToolDescriptor {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }

    /// JSON-Schema-like input description
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| {
                (
                    f.name.to_string(),
                    json!({"type": f.field_type.as_str(), "description": f.description}),
                )
            })
            .collect();
        let required: Vec<&str> = self.required_fields().collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// `{name, description, input_schema}`
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name(),
            "description": self.description,
            "input_schema": self.input_schema(),
        })
    }
}

/// Every descriptor rendered as JSON
pub fn tool_definitions() -> Vec<Value> {
    TOOLS.iter().map(ToolDescriptor::to_json).collect()
}
