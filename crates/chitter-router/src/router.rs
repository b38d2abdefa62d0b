//! Router actor: the single owner of "who is connected".
//!
//! All registry changes and deliveries happen inside one task, one command
//! at a time, in arrival order. Nothing else can read the registry or write
//! to another client's mailbox.

use std::collections::HashMap;

use chitter_protocol::{ClientId, InboundEvent, reply};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};

use crate::{RouterConfig, RouterError};

/// Receiving end of a client's mailbox: bytes to write to its socket.
pub type Mailbox = mpsc::Receiver<Vec<u8>>;

type MailboxSender = mpsc::Sender<Vec<u8>>;

/// What a freshly registered client gets back from the router.
#[derive(Debug)]
pub struct Registration {
    /// The client's ID, fixed for the life of its session.
    pub id: ClientId,
    /// Messages the router delivers to this client.
    pub mailbox: Mailbox,
}

/// A copied snapshot of the router's registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterInfo {
    /// Registered clients, in ascending ID order.
    pub connected: Vec<ClientId>,
    /// The ID the next registration will receive.
    pub next_id: ClientId,
}

/// Commands sent to the router actor through its channel.
///
/// The `oneshot::Sender` in some variants is a reply channel: the caller
/// sends the command and waits for the answer on it.
enum RouterCommand {
    /// Allocate an ID and a mailbox for a new connection.
    Register {
        reply: oneshot::Sender<Result<Registration, RouterError>>,
    },

    /// A broadcast, private message, or disconnect from a session.
    Inbound(InboundEvent),

    /// Request a registry snapshot.
    GetInfo { reply: oneshot::Sender<RouterInfo> },
}

/// Handle to the running router. Cheap to clone; every session holds one.
#[derive(Clone)]
pub struct RouterHandle {
    sender: mpsc::Sender<RouterCommand>,
}

impl RouterHandle {
    /// Registers a new client and returns its ID and mailbox.
    ///
    /// # Errors
    /// [`RouterError::Full`] when `max_clients` are already registered,
    /// [`RouterError::Unavailable`] when the router has stopped.
    pub async fn register(&self) -> Result<Registration, RouterError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RouterCommand::Register { reply: reply_tx })
            .await
            .map_err(|_| RouterError::Unavailable)?;
        reply_rx.await.map_err(|_| RouterError::Unavailable)?
    }

    /// Submits an event for delivery (fire-and-forget).
    pub async fn submit(&self, event: InboundEvent) -> Result<(), RouterError> {
        self.sender
            .send(RouterCommand::Inbound(event))
            .await
            .map_err(|_| RouterError::Unavailable)
    }

    /// Tells the router that `id`'s stream has ended.
    pub async fn disconnect(&self, id: ClientId) -> Result<(), RouterError> {
        self.submit(InboundEvent::Disconnect { sender: id }).await
    }

    /// Requests a snapshot of the registry.
    ///
    /// Because commands are handled in order, the snapshot reflects every
    /// command this handle submitted before calling `info`.
    pub async fn info(&self) -> Result<RouterInfo, RouterError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RouterCommand::GetInfo { reply: reply_tx })
            .await
            .map_err(|_| RouterError::Unavailable)?;
        reply_rx.await.map_err(|_| RouterError::Unavailable)
    }
}

/// The internal router state. Runs inside a Tokio task.
struct Router {
    config: RouterConfig,
    registry: HashMap<ClientId, MailboxSender>,
    next_id: u64,
    receiver: mpsc::Receiver<RouterCommand>,
}

impl Router {
    /// Processes commands until every handle has been dropped.
    async fn run(mut self) {
        tracing::info!(
            mailbox_capacity = self.config.mailbox_capacity,
            max_clients = self.config.max_clients,
            "router started"
        );

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RouterCommand::Register { reply } => {
                    let result = self.handle_register();
                    if let Err(Ok(registration)) = reply.send(result) {
                        // Caller went away before hearing back.
                        self.registry.remove(&registration.id);
                    }
                }
                RouterCommand::Inbound(event) => self.handle_inbound(event),
                RouterCommand::GetInfo { reply } => {
                    let _ = reply.send(self.info());
                }
            }
        }

        tracing::info!("router stopped");
    }

    fn handle_register(&mut self) -> Result<Registration, RouterError> {
        if self.registry.len() >= self.config.max_clients {
            tracing::warn!(
                max_clients = self.config.max_clients,
                "registration refused, router full"
            );
            return Err(RouterError::Full {
                max_clients: self.config.max_clients,
            });
        }

        let id = ClientId(self.next_id);
        self.next_id += 1;

        let (tx, mailbox) = mpsc::channel(self.config.mailbox_capacity);
        self.registry.insert(id, tx);
        tracing::info!(
            client_id = %id,
            clients = self.registry.len(),
            "new client"
        );

        Ok(Registration { id, mailbox })
    }

    fn handle_inbound(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::Broadcast { sender, payload } => {
                self.handle_broadcast(sender, &payload);
            }
            InboundEvent::PrivateMessage {
                sender,
                recipient,
                payload,
            } => self.handle_private(sender, recipient, &payload),
            InboundEvent::Disconnect { sender } => {
                self.handle_disconnect(sender)
            }
        }
    }

    fn handle_broadcast(&self, sender: ClientId, payload: &[u8]) {
        let message = reply::relayed(sender, payload);
        for id in self.registry.keys() {
            if *id != sender {
                self.deliver(*id, message.clone());
            }
        }
        tracing::debug!(
            client_id = %sender,
            bytes = payload.len(),
            "broadcast"
        );
    }

    fn handle_private(
        &self,
        sender: ClientId,
        recipient: ClientId,
        payload: &[u8],
    ) {
        if self.registry.contains_key(&recipient) {
            self.deliver(recipient, reply::relayed(sender, payload));
            tracing::info!(%sender, %recipient, "sent private message");
        } else {
            // Dropped silently if the sender has already gone too.
            self.deliver(sender, reply::unknown_recipient(recipient));
            tracing::info!(%sender, %recipient, "no active user with that id");
        }
    }

    fn handle_disconnect(&mut self, id: ClientId) {
        if self.registry.remove(&id).is_some() {
            tracing::info!(
                client_id = %id,
                clients = self.registry.len(),
                "client closed"
            );
        } else {
            tracing::debug!(client_id = %id, "disconnect for unknown client");
        }
    }

    /// Enqueues `message` for one client without waiting.
    ///
    /// A full mailbox drops the new message (drop-newest); a closed one
    /// means the session is already tearing down.
    fn deliver(&self, recipient: ClientId, message: Vec<u8>) {
        let Some(mailbox) = self.registry.get(&recipient) else {
            return;
        };
        match mailbox.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    client_id = %recipient,
                    capacity = self.config.mailbox_capacity,
                    "mailbox full, dropping message"
                );
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(
                    client_id = %recipient,
                    "mailbox closed, dropping message"
                );
            }
        }
    }

    fn info(&self) -> RouterInfo {
        let mut connected: Vec<ClientId> =
            self.registry.keys().copied().collect();
        connected.sort();
        RouterInfo {
            connected,
            next_id: ClientId(self.next_id),
        }
    }
}

/// Spawns the router task and returns a handle to communicate with it.
///
/// The task stops once every [`RouterHandle`] has been dropped.
///
/// # Errors
/// [`RouterError::ZeroCapacity`] if `config` fails
/// [`RouterConfig::validate`]; no task is started.
pub fn spawn_router(config: RouterConfig) -> Result<RouterHandle, RouterError> {
    config.validate()?;
    let (tx, rx) = mpsc::channel(config.event_capacity);

    let router = Router {
        config,
        registry: HashMap::new(),
        next_id: 0,
        receiver: rx,
    };

    tokio::spawn(router.run());

    Ok(RouterHandle { sender: tx })
}
