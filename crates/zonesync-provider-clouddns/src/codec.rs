//! Record codec
//!
//! Bidirectional mapping between the provider-neutral record model and the
//! remote wire format. Every supported type has an `encode` shape (model
//! value to rrdata string) and a `decode` shape (rrdata strings to typed
//! values); both are pure functions dispatched over [`RecordType`].
//!
//! | type              | rrdata shape                                            |
//! |-------------------|---------------------------------------------------------|
//! | A, AAAA, NS       | one raw address/hostname per rrdata                     |
//! | CNAME, ALIAS, PTR | a single raw target                                     |
//! | CAA               | `<flags> <tag> <value>`                                 |
//! | DS                | `<key_tag> <algorithm> <digest_type> <digest>`          |
//! | MX                | `<preference> <exchange>`                               |
//! | NAPTR             | `<order> <pref> "<flags>" "<service>" "<regexp>" <repl>`|
//! | SRV               | `<priority> <weight> <port> <target>`                   |
//! | SPF, TXT          | raw text, chunked on encode, `;` escaped on decode      |
//!
//! Multi-field rrdatas are tokenized with shell-style quoting, so fields
//! that contain spaces survive the round trip.

use std::str::FromStr;

use zonesync_core::record::chunked_value;
use zonesync_core::{
    CaaValue, DsValue, Error, MxValue, NaptrValue, Record, RecordData, RecordType, Result,
    SrvValue,
};

use crate::transport::{RemoteRecordSet, RemoteZone};

/// Append a trailing dot unless the value already has one
pub fn add_trailing_dot(value: &str) -> String {
    if value.ends_with('.') {
        value.to_string()
    } else {
        format!("{value}.")
    }
}

/// Escape every semicolon that is not already escaped
///
/// Remote TXT/SPF rrdatas carry bare semicolons; the model requires them
/// escaped. Idempotent.
pub fn escape_semicolons(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_backslash = false;
    for c in value.chars() {
        if c == ';' && !prev_backslash {
            out.push('\\');
        }
        out.push(c);
        prev_backslash = c == '\\';
    }
    out
}

/// Split one rrdata into whitespace-separated fields, honoring shell-style
/// quoting
fn split_quoted(input: &str) -> std::result::Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_field = false;
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                } else if c == '\\' {
                    // inside quotes a backslash escapes only the quote
                    // character and itself
                    match chars.next() {
                        Some(n) if n == q || n == '\\' => current.push(n),
                        Some(n) => {
                            current.push('\\');
                            current.push(n);
                        }
                        None => current.push('\\'),
                    }
                } else {
                    current.push(c);
                }
            }
            None if c.is_whitespace() => {
                if in_field {
                    fields.push(std::mem::take(&mut current));
                    in_field = false;
                }
            }
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_field = true;
            }
            None if c == '\\' => {
                in_field = true;
                if let Some(n) = chars.next() {
                    current.push(n);
                }
            }
            None => {
                in_field = true;
                current.push(c);
            }
        }
    }

    if quote.is_some() {
        return Err("unterminated quote".to_string());
    }
    if in_field {
        fields.push(current);
    }
    Ok(fields)
}

/// Tokenize `rrdata` and insist on an exact field count
fn fields_of(
    record_set: &RemoteRecordSet,
    rrdata: &str,
    expected: usize,
) -> Result<Vec<String>> {
    let fields = split_quoted(rrdata)
        .map_err(|reason| Error::decode(&record_set.name, &record_set.record_type, reason))?;
    if fields.len() != expected {
        return Err(Error::decode(
            &record_set.name,
            &record_set.record_type,
            format!("expected {expected} fields, got {} in {rrdata:?}", fields.len()),
        ));
    }
    Ok(fields)
}

fn numeric<T: FromStr>(record_set: &RemoteRecordSet, field: &str, token: &str) -> Result<T> {
    token.parse().map_err(|_| {
        Error::decode(
            &record_set.name,
            &record_set.record_type,
            format!("{field} is not numeric: {token:?}"),
        )
    })
}

fn singleton(record_set: &RemoteRecordSet) -> Result<String> {
    record_set.rrdatas.first().cloned().ok_or_else(|| {
        Error::decode(&record_set.name, &record_set.record_type, "empty rrdatas")
    })
}

/// Decode a remote record set into a typed model payload
///
/// # Errors
///
/// [`Error::Decode`] when an rrdata does not tokenize into the expected
/// field count or a numeric field fails to parse. Decode failures are hard
/// errors; silently dropping a record would desynchronize desired and
/// observed state.
pub fn decode(record_type: RecordType, record_set: &RemoteRecordSet) -> Result<RecordData> {
    let rrdatas = &record_set.rrdatas;
    match record_type {
        RecordType::A => Ok(RecordData::A { values: rrdatas.clone() }),
        RecordType::Aaaa => Ok(RecordData::Aaaa { values: rrdatas.clone() }),
        RecordType::Ns => Ok(RecordData::Ns { values: rrdatas.clone() }),
        RecordType::Alias => Ok(RecordData::Alias { value: singleton(record_set)? }),
        RecordType::Cname => Ok(RecordData::Cname { value: singleton(record_set)? }),
        RecordType::Ptr => Ok(RecordData::Ptr { value: singleton(record_set)? }),
        RecordType::Caa => {
            let mut values = Vec::with_capacity(rrdatas.len());
            for rrdata in rrdatas {
                let f = fields_of(record_set, rrdata, 3)?;
                values.push(CaaValue {
                    flags: numeric(record_set, "flags", &f[0])?,
                    tag: f[1].clone(),
                    value: f[2].clone(),
                });
            }
            Ok(RecordData::Caa { values })
        }
        RecordType::Ds => {
            let mut values = Vec::with_capacity(rrdatas.len());
            for rrdata in rrdatas {
                let f = fields_of(record_set, rrdata, 4)?;
                values.push(DsValue {
                    key_tag: numeric(record_set, "key_tag", &f[0])?,
                    algorithm: numeric(record_set, "algorithm", &f[1])?,
                    digest_type: numeric(record_set, "digest_type", &f[2])?,
                    digest: f[3].clone(),
                });
            }
            Ok(RecordData::Ds { values })
        }
        RecordType::Mx => {
            let mut values = Vec::with_capacity(rrdatas.len());
            for rrdata in rrdatas {
                let f = fields_of(record_set, rrdata, 2)?;
                values.push(MxValue {
                    preference: numeric(record_set, "preference", &f[0])?,
                    exchange: f[1].clone(),
                });
            }
            Ok(RecordData::Mx { values })
        }
        RecordType::Naptr => {
            let mut values = Vec::with_capacity(rrdatas.len());
            for rrdata in rrdatas {
                let f = fields_of(record_set, rrdata, 6)?;
                values.push(NaptrValue {
                    order: numeric(record_set, "order", &f[0])?,
                    preference: numeric(record_set, "preference", &f[1])?,
                    flags: f[2].clone(),
                    service: f[3].clone(),
                    regexp: f[4].clone(),
                    replacement: f[5].clone(),
                });
            }
            Ok(RecordData::Naptr { values })
        }
        RecordType::Srv => {
            let mut values = Vec::with_capacity(rrdatas.len());
            for rrdata in rrdatas {
                let f = fields_of(record_set, rrdata, 4)?;
                values.push(SrvValue {
                    priority: numeric(record_set, "priority", &f[0])?,
                    weight: numeric(record_set, "weight", &f[1])?,
                    port: numeric(record_set, "port", &f[2])?,
                    target: f[3].clone(),
                });
            }
            Ok(RecordData::Srv { values })
        }
        RecordType::Spf => Ok(RecordData::Spf {
            values: rrdatas.iter().map(|v| escape_semicolons(v)).collect(),
        }),
        RecordType::Txt => Ok(RecordData::Txt {
            values: rrdatas.iter().map(|v| escape_semicolons(v)).collect(),
        }),
    }
}

/// Encode a model record into remote rrdata strings
pub fn encode(record: &Record) -> Vec<String> {
    match &record.data {
        RecordData::A { values } | RecordData::Aaaa { values } | RecordData::Ns { values } => {
            values.clone()
        }
        RecordData::Alias { value } | RecordData::Cname { value } | RecordData::Ptr { value } => {
            vec![add_trailing_dot(value)]
        }
        RecordData::Caa { values } => values
            .iter()
            .map(|v| format!("{} {} {}", v.flags, v.tag, v.value))
            .collect(),
        RecordData::Ds { values } => values
            .iter()
            .map(|v| format!("{} {} {} {}", v.key_tag, v.algorithm, v.digest_type, v.digest))
            .collect(),
        RecordData::Mx { values } => values
            .iter()
            .map(|v| format!("{} {}", v.preference, add_trailing_dot(&v.exchange)))
            .collect(),
        RecordData::Naptr { values } => values
            .iter()
            .map(|v| {
                format!(
                    "{} {} \"{}\" \"{}\" \"{}\" {}",
                    v.order, v.preference, v.flags, v.service, v.regexp, v.replacement
                )
            })
            .collect(),
        RecordData::Srv { values } => values
            .iter()
            .map(|v| format!("{} {} {} {}", v.priority, v.weight, v.port, v.target))
            .collect(),
        RecordData::Spf { values } | RecordData::Txt { values } => {
            values.iter().map(|v| chunked_value(v)).collect()
        }
    }
}

/// Build the remote record set representation of a model record
pub fn rrset_for(zone: &RemoteZone, record: &Record) -> RemoteRecordSet {
    RemoteRecordSet {
        name: record.fqdn(&zone.dns_name),
        record_type: record.record_type().as_str().to_string(),
        ttl: record.ttl,
        rrdatas: encode(record),
    }
}
