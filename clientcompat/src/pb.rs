//! Protobuf messages of the `twirp.clientcompat` package and their descriptors.
use prost::Message;
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet,
    MethodDescriptorProto, ServiceDescriptorProto,
    field_descriptor_proto::{Label, Type},
};

pub const PACKAGE: &str = "twirp.clientcompat";

#[derive(Clone, Copy, PartialEq, Eq, Hash, prost::Message)]
pub struct Empty {}

#[derive(Clone, PartialEq, Eq, Hash, prost::Message)]
pub struct Req {
    #[prost(string, tag = "1")]
    pub v: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, prost::Message)]
pub struct Resp {
    #[prost(int32, tag = "1")]
    pub v: i32,
}

/// The schema of the package, equivalent to `protoc --descriptor_set_out` on
/// `clientcompat.proto`.
pub fn file_descriptor_set() -> FileDescriptorSet {
    let file = FileDescriptorProto {
        name: Some("clientcompat.proto".to_string()),
        package: Some(PACKAGE.to_string()),
        message_type: vec![
            message("Empty", vec![]),
            message("Req", vec![field("v", 1, Type::String)]),
            message("Resp", vec![field("v", 1, Type::Int32)]),
        ],
        service: vec![ServiceDescriptorProto {
            name: Some("CompatService".to_string()),
            method: vec![
                method("Method", "Req", "Resp"),
                method("NoopMethod", "Empty", "Empty"),
            ],
            ..Default::default()
        }],
        syntax: Some("proto3".to_string()),
        ..Default::default()
    };

    FileDescriptorSet { file: vec![file] }
}

/// The encoded [`file_descriptor_set`], as read from a `.bin` descriptor file.
pub fn file_descriptor_set_bytes() -> Vec<u8> {
    file_descriptor_set().encode_to_vec()
}

fn message(name: &str, field: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field,
        ..Default::default()
    }
}

fn field(name: &str, number: i32, kind: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        json_name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(kind as i32),
        ..Default::default()
    }
}

fn method(name: &str, input: &str, output: &str) -> MethodDescriptorProto {
    MethodDescriptorProto {
        name: Some(name.to_string()),
        input_type: Some(format!(".{PACKAGE}.{input}")),
        output_type: Some(format!(".{PACKAGE}.{output}")),
        ..Default::default()
    }
}
