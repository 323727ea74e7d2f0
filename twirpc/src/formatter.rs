use colored::*;
use std::collections::HashSet;
use std::fmt::Display;
use twirpc_core::{
    TwirpError,
    client::{Descriptor, online::DynamicCallError},
    prost_reflect::{
        self, EnumDescriptor, FieldDescriptor, Kind, MessageDescriptor, MethodDescriptor,
        ServiceDescriptor,
    },
};

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

pub struct ServiceList(pub Vec<String>);

/// A message together with every message and enum it depends on.
pub struct ExpandedMessage(pub MessageDescriptor);

pub struct GenericError<T: Display>(pub &'static str, pub T);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<TwirpError> for FormattedString {
    fn from(err: TwirpError) -> Self {
        let mut out = format!(
            "{} code={:?} message={:?}",
            "Twirp Failed:".red().bold(),
            err.code,
            err.message
        );

        let mut meta: Vec<_> = err.meta.into_iter().collect();
        meta.sort();
        for (key, value) in meta {
            out.push_str(&format!("\n  {}: {}", key.yellow(), value));
        }
        FormattedString(out)
    }
}

impl From<DynamicCallError> for FormattedString {
    fn from(err: DynamicCallError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Call Failed:".red().bold(), err))
    }
}

impl From<prost_reflect::DescriptorError> for FormattedString {
    fn from(err: prost_reflect::DescriptorError) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Failed to parse file descriptor:".red().bold(),
            err
        ))
    }
}

impl From<std::io::Error> for FormattedString {
    fn from(err: std::io::Error) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Failed to read file:".red().bold(),
            err
        ))
    }
}

impl<T: Display> From<GenericError<T>> for FormattedString {
    fn from(GenericError(msg, err): GenericError<T>) -> Self {
        FormattedString(format!("{}:\n\n'{}'", msg.red().bold(), err))
    }
}

impl From<ServiceList> for FormattedString {
    fn from(ServiceList(services): ServiceList) -> Self {
        if services.is_empty() {
            return FormattedString("No services found.".yellow().to_string());
        }

        let mut out = String::new();
        out.push_str("Available Services:\n");
        for svc in services {
            out.push_str(&format!("  - {}\n", svc.green()));
        }
        FormattedString(out.trim_end().to_string())
    }
}

impl From<Descriptor> for FormattedString {
    fn from(descriptor: Descriptor) -> Self {
        match descriptor {
            Descriptor::MessageDescriptor(d) => FormattedString::from(d),
            Descriptor::ServiceDescriptor(d) => FormattedString::from(d),
            Descriptor::EnumDescriptor(d) => FormattedString::from(d),
        }
    }
}

impl From<ServiceDescriptor> for FormattedString {
    fn from(service: ServiceDescriptor) -> Self {
        let methods: Vec<String> = service
            .methods()
            .map(|method| format!("  {}", FormattedString::from(method).0))
            .collect();

        FormattedString(format!(
            "{} {} {{\n{}\n}}",
            "service".cyan(),
            service.name().green(),
            methods.join("\n")
        ))
    }
}

impl From<MethodDescriptor> for FormattedString {
    fn from(method: MethodDescriptor) -> Self {
        // Twirp cannot call streaming methods, but the schema may still declare them.
        let stream = |streaming: bool| {
            if streaming {
                format!("{} ", "stream".cyan())
            } else {
                String::new()
            }
        };

        FormattedString(format!(
            "{} {}({}{}) {} ({}{});",
            "rpc".cyan(),
            method.name().green(),
            stream(method.is_client_streaming()),
            method.input().full_name().yellow(),
            "returns".cyan(),
            stream(method.is_server_streaming()),
            method.output().full_name().yellow()
        ))
    }
}

/// The proto type name of a field kind (`int32`, `my.pkg.Message`...).
fn kind_name(kind: &Kind) -> String {
    match kind {
        Kind::Message(m) => m.full_name().to_string(),
        Kind::Enum(e) => e.full_name().to_string(),
        scalar => format!("{scalar:?}").to_lowercase(),
    }
}

fn field_type(field: &FieldDescriptor) -> String {
    let kind = field.kind();

    if field.is_map() {
        if let Some(entry) = kind.as_message() {
            let key = kind_name(&entry.map_entry_key_field().kind());
            let value = kind_name(&entry.map_entry_value_field().kind());
            return format!("map<{}, {}>", key.yellow(), value.yellow());
        }
    }

    let name = kind_name(&kind).yellow().to_string();
    if field.is_list() {
        format!("{} {name}", "repeated".cyan())
    } else {
        name
    }
}

impl From<MessageDescriptor> for FormattedString {
    fn from(message: MessageDescriptor) -> Self {
        let mut out = format!("{} {} {{\n", "message".cyan(), message.name().green());

        for field in message.fields() {
            out.push_str(&format!(
                "  {} {} = {};\n",
                field_type(&field),
                field.name(),
                field.number()
            ));
        }
        out.push('}');
        FormattedString(out)
    }
}

impl From<EnumDescriptor> for FormattedString {
    fn from(enum_desc: EnumDescriptor) -> Self {
        let mut out = format!("{} {} {{\n", "enum".cyan(), enum_desc.name().green());

        for val in enum_desc.values() {
            out.push_str(&format!(
                "  {} = {};\n",
                val.name(),
                val.number().to_string().purple()
            ));
        }
        out.push('}');
        FormattedString(out)
    }
}

impl From<ExpandedMessage> for FormattedString {
    fn from(ExpandedMessage(message): ExpandedMessage) -> Self {
        let mut seen = HashSet::new();
        let mut blocks = Vec::new();
        let mut pending = vec![Descriptor::MessageDescriptor(message)];

        // Depth-first walk over field types, printing each dependency once.
        while let Some(descriptor) = pending.pop() {
            if !seen.insert(descriptor.full_name().to_string()) {
                continue;
            }

            if let Descriptor::MessageDescriptor(message) = &descriptor {
                for field in message.fields() {
                    match field.kind() {
                        Kind::Message(m) => pending.push(Descriptor::MessageDescriptor(m)),
                        Kind::Enum(e) => pending.push(Descriptor::EnumDescriptor(e)),
                        _ => {}
                    }
                }
            }

            blocks.push(FormattedString::from(descriptor).0);
        }

        FormattedString(blocks.join("\n\n"))
    }
}
