use ncpath_core::settings::{CONFIGURE_NAMESPACE, STATE_NAMESPACE};
use ncpath_core::{Datastore, DefaultOperation, Filter, NcError, NetconfSession, Result};

/// One call made against a [`MockSession`]
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Call {
    GetConfig(Datastore, String),
    Get(String),
    EditConfig(Datastore, String, DefaultOperation),
    Commit,
    DiscardChanges,
}

/// Scripted session: serves fixed replies per datastore and records calls.
/// Edits are recorded but not applied; script `candidate` to reflect them.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MockSession {
    pub running: String,
    pub candidate: Option<String>,
    pub state: String,
    pub calls: Vec<Call>,
    pub fail_on: Option<&'static str>,
}

#[allow(dead_code)]
impl MockSession {
    pub fn new(running_inner: &str) -> Self {
        Self {
            running: config_reply(running_inner),
            state: state_reply(""),
            ..Default::default()
        }
    }

    pub fn with_candidate(mut self, candidate_inner: &str) -> Self {
        self.candidate = Some(config_reply(candidate_inner));
        self
    }

    pub fn with_state(mut self, state_inner: &str) -> Self {
        self.state = state_reply(state_inner);
        self
    }

    pub fn failing_on(mut self, op: &'static str) -> Self {
        self.fail_on = Some(op);
        self
    }

    pub fn committed(&self) -> bool {
        self.calls.contains(&Call::Commit)
    }

    pub fn discarded(&self) -> bool {
        self.calls.contains(&Call::DiscardChanges)
    }

    pub fn edits(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::EditConfig(_, xml, _) => Some(xml.as_str()),
                _ => None,
            })
            .collect()
    }

    fn check(&self, op: &str) -> Result<()> {
        match self.fail_on {
            Some(failing) if failing == op => Err(NcError::transport(op, "connection reset by peer")),
            _ => Ok(()),
        }
    }
}

impl NetconfSession for MockSession {
    fn get_config(&mut self, source: Datastore, filter: &Filter) -> Result<String> {
        self.calls
            .push(Call::GetConfig(source, filter.as_str().to_string()));
        self.check("get_config")?;
        Ok(match source {
            Datastore::Candidate => self.candidate.clone().unwrap_or_else(|| self.running.clone()),
            _ => self.running.clone(),
        })
    }

    fn get(&mut self, filter: &Filter) -> Result<String> {
        self.calls.push(Call::Get(filter.as_str().to_string()));
        self.check("get")?;
        Ok(self.state.clone())
    }

    fn edit_config(
        &mut self,
        target: Datastore,
        config: &str,
        default_operation: DefaultOperation,
    ) -> Result<()> {
        self.calls
            .push(Call::EditConfig(target, config.to_string(), default_operation));
        self.check("edit_config")
    }

    fn commit(&mut self) -> Result<()> {
        self.calls.push(Call::Commit);
        self.check("commit")
    }

    fn discard_changes(&mut self) -> Result<()> {
        self.calls.push(Call::DiscardChanges);
        self.check("discard_changes")
    }
}

/// Wrap `inner` in an `<rpc-reply>` carrying the configure datastore
#[allow(dead_code)]
pub fn config_reply(inner: &str) -> String {
    format!(
        "<rpc-reply xmlns=\"urn:ietf:params:xml:ns:netconf:base:1.0\" message-id=\"101\">\
         <data><configure xmlns=\"{}\">{}</configure></data></rpc-reply>",
        CONFIGURE_NAMESPACE, inner
    )
}

#[allow(dead_code)]
pub fn state_reply(inner: &str) -> String {
    format!(
        "<rpc-reply message-id=\"102\"><data><state xmlns=\"{}\">{}</state></data></rpc-reply>",
        STATE_NAMESPACE, inner
    )
}

/// A router with three interfaces, one of them `to_sr2`
#[allow(dead_code)]
pub const THREE_INTERFACES: &str = "<router><router-name>Base</router-name>\
    <interface><interface-name>system</interface-name><admin-state>enable</admin-state>\
    <ipv4><primary><address>10.0.0.1</address><prefix-length>32</prefix-length></primary></ipv4></interface>\
    <interface><interface-name>to_sr2</interface-name><admin-state>enable</admin-state>\
    <description>uplink</description><port>1/1/1</port>\
    <ipv4><primary><address>192.168.12.1</address><prefix-length>30</prefix-length></primary></ipv4></interface>\
    <interface><interface-name>to_sr3</interface-name><admin-state>disable</admin-state>\
    <port>1/1/2</port></interface>\
    </router>";
