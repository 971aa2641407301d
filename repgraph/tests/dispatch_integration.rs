use std::cell::RefCell;
use std::rc::Rc;

use codec::{
    archive_message, decode_archive, encode_archive, CodecLimits, Player, PowerPropertyUpdate,
    ReplicatedPropertyCollection,
};
use proptest::prelude::*;
use repgraph::{DispatchError, Game, HandlerRef, ReplicationId};
use schema::{property_unhash, IdentityTable};
use wire::{decode_messages, encode_messages, Limits};

fn shared(collection: ReplicatedPropertyCollection) -> Rc<RefCell<ReplicatedPropertyCollection>> {
    Rc::new(RefCell::new(collection))
}

#[test]
fn decoded_player_collections_receive_deltas() {
    let mut sent = Player::default();
    sent.property_collection = ReplicatedPropertyCollection::new(0);
    sent.avatar_properties = ReplicatedPropertyCollection::new(0);

    // Server side: register the live collections before sending the archive.
    let mut game = Game::new();
    let player_props = shared(sent.property_collection.clone());
    let avatar_props = shared(sent.avatar_properties.clone());
    let player_handler: HandlerRef = player_props.clone();
    let avatar_handler: HandlerRef = avatar_props.clone();
    let player_id = game.register(&player_handler).unwrap();
    let avatar_id = game.register(&avatar_handler).unwrap();
    assert_eq!(player_id, ReplicationId(1));
    assert_eq!(avatar_id, ReplicationId(2));

    sent.property_collection = player_props.borrow().clone();
    sent.avatar_properties = avatar_props.borrow().clone();
    let bytes = encode_archive(&mut sent, &IdentityTable).unwrap();

    // Client side: the decoded archive carries the ids and can be registered as-is.
    let received: Player = decode_archive(&bytes, &IdentityTable, &CodecLimits::default()).unwrap();
    let mut client = Game::new();
    let client_avatar = shared(received.avatar_properties.clone());
    let client_handler: HandlerRef = client_avatar.clone();
    assert_eq!(client.register(&client_handler).unwrap(), avatar_id);

    let property_id = property_unhash(0x155);
    let mut update = PowerPropertyUpdate {
        replication_id: avatar_id.raw(),
        property_id,
        value: 7,
    };
    let message = archive_message(30, &mut update, &IdentityTable).unwrap();
    client
        .apply_update_message(&message, &IdentityTable, &CodecLimits::default())
        .unwrap();
    assert_eq!(client_avatar.borrow().get(property_id), Some(7));
}

#[test]
fn bad_message_in_batch_does_not_disturb_routing() {
    let mut game = Game::new();
    let props = shared(ReplicatedPropertyCollection::new(0));
    let handler: HandlerRef = props.clone();
    let id = game.register(&handler).unwrap();

    let mut good = PowerPropertyUpdate {
        replication_id: id.raw(),
        property_id: 0x3ba,
        value: 11,
    };
    let first = archive_message(30, &mut good, &IdentityTable).unwrap();
    let truncated = wire::GameMessage::new(30, vec![id.raw() as u8]);
    let messages = vec![first, truncated];
    let bytes = encode_messages(&messages).unwrap();

    let batch = decode_messages(&bytes, &Limits::default());
    assert!(batch.is_complete());
    let results: Vec<_> = batch
        .messages
        .iter()
        .map(|message| game.apply_update_message(message, &IdentityTable, &CodecLimits::default()))
        .collect();
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(DispatchError::Codec(_))));
    assert_eq!(props.borrow().get(0x3ba), Some(11));
}

#[test]
fn unregistered_collection_stops_receiving() {
    let mut game = Game::new();
    let props = shared(ReplicatedPropertyCollection::new(0));
    let handler: HandlerRef = props.clone();
    let id = game.register(&handler).unwrap();
    game.unregister(&handler).unwrap();

    assert!(game.lookup(id).is_none());
    let update = PowerPropertyUpdate {
        replication_id: id.raw(),
        property_id: 0x3ba,
        value: 1,
    };
    assert_eq!(
        game.dispatcher().route_property_update(&update),
        Err(DispatchError::UnknownHandler { id })
    );
    assert_eq!(
        game.unregister(&handler),
        Err(DispatchError::UnknownHandler { id })
    );
}

#[test]
fn automatic_ids_skip_explicit_registrations() {
    let mut game = Game::new();
    let explicit: HandlerRef = shared(ReplicatedPropertyCollection::new(2));
    game.register(&explicit).unwrap();

    let first: HandlerRef = shared(ReplicatedPropertyCollection::new(0));
    let second: HandlerRef = shared(ReplicatedPropertyCollection::new(0));
    assert_eq!(game.register(&first).unwrap(), ReplicationId(1));
    assert_eq!(game.register(&second).unwrap(), ReplicationId(3));
    assert_eq!(game.next_replication_id(), ReplicationId(4));
}

proptest! {
    #[test]
    fn prop_registered_ids_are_unique(explicit in prop::collection::vec(0u64..16, 0..24)) {
        let mut game = Game::new();
        let mut handlers = Vec::new();
        let mut seen = std::collections::BTreeSet::new();
        for id in explicit {
            let handler: HandlerRef = shared(ReplicatedPropertyCollection::new(id));
            match game.register(&handler) {
                Ok(assigned) => {
                    prop_assert!(assigned.is_valid());
                    prop_assert!(seen.insert(assigned));
                    handlers.push(handler);
                }
                Err(DispatchError::ReplicationIdCollision { id: taken }) => {
                    prop_assert!(seen.contains(&taken));
                }
                Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            }
        }
        for id in seen {
            prop_assert!(game.lookup(id).is_some());
        }
    }
}
