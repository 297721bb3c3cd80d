//! Application profile creation form

use super::{FormOutcome, edit_text};
use crate::app::Key;
use crate::app::selection::SelectionList;
use crate::core::error::ValidationError;
use crate::core::profiles::Profile;
use crate::validators;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Title,
    Description,
    Ports,
}

impl ProfileField {
    pub const ALL: [ProfileField; 4] = [
        ProfileField::Name,
        ProfileField::Title,
        ProfileField::Description,
        ProfileField::Ports,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::Title => "Title (Optional)",
            ProfileField::Description => "Description (Optional)",
            ProfileField::Ports => "Ports (e.g. 80,443/tcp|53/udp)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub title: String,
    pub description: String,
    pub ports: String,
    fields: SelectionList<ProfileField>,
    pub error: Option<String>,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            description: String::new(),
            ports: String::new(),
            fields: SelectionList::new(ProfileField::ALL.to_vec()),
            error: None,
        }
    }
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &SelectionList<ProfileField> {
        &self.fields
    }

    pub fn focused_field(&self) -> ProfileField {
        self.fields.focused().copied().unwrap_or(ProfileField::Name)
    }

    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Title => &self.title,
            ProfileField::Description => &self.description,
            ProfileField::Ports => &self.ports,
        }
    }

    fn value_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Title => &mut self.title,
            ProfileField::Description => &mut self.description,
            ProfileField::Ports => &mut self.ports,
        }
    }

    pub fn update(&mut self, key: &Key) -> FormOutcome<Profile> {
        match key {
            Key::Up => self.fields.prev(),
            Key::Down => self.fields.next(),
            Key::Esc => return FormOutcome::Cancel,
            Key::Enter => match self.build_profile() {
                Ok(profile) => return FormOutcome::Submit(profile),
                Err(e) => self.error = Some(e.to_string()),
            },
            _ => {
                let field = self.focused_field();
                if edit_text(self.value_mut(field), key) {
                    self.error = None;
                }
            }
        }
        FormOutcome::Editing
    }

    /// Validates the fields and builds the profile to install.
    ///
    /// Name and ports are required; title and description are optional.
    pub fn build_profile(&self) -> Result<Profile, ValidationError> {
        let name = self.name.trim();
        validators::validate_profile_name(name)?;
        validators::validate_port_spec(&self.ports)?;

        Ok(Profile {
            name: name.to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            ports: self.ports.split('|').map(normalize_port_group).collect(),
            installed: false,
        })
    }
}

/// Strips the whitespace validation tolerates, so `" 80 , 443/tcp"` is
/// written as `80,443/tcp`
fn normalize_port_group(group: &str) -> String {
    let (ports, protocol) = match group.split_once('/') {
        Some((ports, protocol)) => (ports, Some(protocol.trim())),
        None => (group, None),
    };
    let mut normalized = ports
        .split(',')
        .map(|entry| entry.split(':').map(str::trim).collect::<Vec<_>>().join(":"))
        .collect::<Vec<_>>()
        .join(",");
    if let Some(protocol) = protocol {
        normalized.push('/');
        normalized.push_str(protocol);
    }
    normalized
}
