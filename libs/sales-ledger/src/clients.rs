use shop_api::{ClientRecord, StoreError};

/// Clients registered during the current session.
///
/// Kept in memory only: nothing here is written to disk, and there is no
/// way to remove or edit an entry once registered.
#[derive(Debug, Default)]
pub struct ClientBook {
    clients: Vec<ClientRecord>,
}

impl ClientBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client. A blank phone is stored as `None`.
    pub fn register(
        &mut self,
        name: &str,
        phone: Option<&str>,
    ) -> Result<&ClientRecord, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::MissingField("client name"));
        }
        let phone = phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        self.clients.push(ClientRecord {
            name: name.to_string(),
            phone,
        });
        tracing::info!(client = %name, "client registered");
        Ok(&self.clients[self.clients.len() - 1])
    }

    pub fn find(&self, name: &str) -> Option<&ClientRecord> {
        self.clients.iter().find(|c| c.name == name)
    }

    pub fn clients(&self) -> &[ClientRecord] {
        &self.clients
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
