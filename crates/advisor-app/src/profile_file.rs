use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use advisor_types::profile::fields;
use advisor_types::{Profile, ProfileForm};

/// Load intake answers from a TOML file.
///
/// Keys are profile field names. `countries` is an array of codes; every other
/// value may be a string, integer or float.
pub fn load_profile_form(path: &Path) -> Result<ProfileForm> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file {}", path.display()))?;
    parse_profile_form(&text).with_context(|| format!("Invalid profile file {}", path.display()))
}

pub fn parse_profile_form(text: &str) -> Result<ProfileForm> {
    let table: toml::Table = text.parse().context("Failed to parse TOML")?;
    let mut form = ProfileForm::new();

    for (key, value) in table {
        if key == fields::COUNTRIES {
            let Some(codes) = value.as_array() else {
                bail!("'countries' must be an array of country codes");
            };
            for code in codes {
                let Some(code) = code.as_str() else {
                    bail!("'countries' entries must be strings");
                };
                form = form.with_country(code);
            }
            continue;
        }

        let text = match value {
            toml::Value::String(s) => s,
            toml::Value::Integer(i) => i.to_string(),
            toml::Value::Float(f) => f.to_string(),
            other => bail!("'{}' has unsupported value type {}", key, other.type_str()),
        };
        if !fields::REQUIRED.contains(&key.as_str()) && !fields::OPTIONAL.contains(&key.as_str()) {
            log::warn!("Ignoring unknown profile field '{}'", key);
            continue;
        }
        form.set(&key, text);
    }

    Ok(form)
}

/// Turn a previously submitted profile back into editable form input
pub fn form_from_profile(profile: &Profile) -> Result<ProfileForm> {
    let value = serde_json::to_value(profile).context("Failed to serialize profile")?;
    let Some(object) = value.as_object() else {
        bail!("profile did not serialize to an object");
    };

    let mut form = ProfileForm::new();
    for (key, value) in object {
        match value {
            serde_json::Value::String(s) => form.set(key, s.as_str()),
            serde_json::Value::Number(n) => form.set(key, n.to_string()),
            serde_json::Value::Array(codes) if key == fields::COUNTRIES => {
                for code in codes.iter().filter_map(|c| c.as_str()) {
                    form = form.with_country(code);
                }
            }
            _ => {}
        }
    }
    Ok(form)
}
