use crate::correlator::Correlator;
use crate::error::QueryError;
use crate::inbound::{run_inbound, UdpFrameSource};
use crate::protocol::{DomainName, Message, RecordType};
use crate::reg_table::RegTable;
use crate::system::{next_id, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Send side of one UDP channel to one server: picks transaction ids,
/// registers the result slot, encodes with the shared wire model, and
/// awaits the correlated answer. Retry, timeout, and server selection
/// policy stay with the caller; a caller that gives up simply drops its
/// receiver and a late answer is absorbed by the table lookup miss.
pub struct Exchange {
    socket: Arc<UdpSocket>,
    reg_table: Arc<RegTable>,
    server: SocketAddr,
}

impl Exchange {
    /// Binds an ephemeral socket and spawns the inbound pump for it. The
    /// channel serves any number of queries, sequential or concurrent.
    pub async fn create(server: SocketAddr) -> Result<Self> {
        let socket = Arc::new(UdpSocket::bind("0.0.0.0:0").await?);
        let reg_table = Arc::new(RegTable::new());
        let correlator = Arc::new(Correlator::new(reg_table.clone()));
        tokio::spawn(run_inbound(UdpFrameSource::new(socket.clone()), correlator));
        Ok(Exchange {
            socket,
            reg_table,
            server,
        })
    }

    pub async fn query(
        &self,
        domain: &str,
        q_type: RecordType,
    ) -> std::result::Result<Message, QueryError> {
        let name = DomainName::from_dotted(domain).map_err(QueryError::InvalidName)?;
        let (id, receiver) = loop {
            let (sender, receiver) = oneshot::channel();
            let id = next_id();
            match self.reg_table.register(id, sender) {
                Ok(()) => break (id, receiver),
                // Id still leased to an in-flight query, pick another.
                Err(_) => continue,
            }
        };
        let query = Message::query(id, name, q_type);
        if let Err(error) = self
            .socket
            .send_to(query.to_u8_vec().as_slice(), self.server)
            .await
        {
            // Nothing went out, so release the lease instead of leaving
            // an entry that could only be cleaned up by a channel fault.
            self.reg_table.take_and_remove(id);
            return Err(QueryError::Transport(error.into()));
        }
        match receiver.await {
            Ok(Ok(answer)) => Ok(answer),
            Ok(Err(transport)) => Err(QueryError::Transport(transport)),
            Err(_) => Err(QueryError::ChannelClosed),
        }
    }

    pub fn get_reg_table(&self) -> &Arc<RegTable> {
        &self.reg_table
    }
}
