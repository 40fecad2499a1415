//! In-memory store
//!
//! Emulates the store's command set over ordered maps so the client can be
//! exercised without a server.
//!
//! ## Data Structure Choice
//! BTreeMaps behind one `parking_lot::Mutex`:
//! - ordered keys (range commands walk `(start, end]` windows)
//! - one lock for all three families keeps multi-key commands atomic

use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::ops::Bound;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use parking_lot::Mutex;

use crate::network::Transport;
use crate::protocol::{Command, STATUS_NOT_FOUND, STATUS_OK};

type Reply = Vec<String>;

/// Early-return channel for argument errors: `Err` is a finished reply
type Outcome = std::result::Result<Reply, Reply>;

/// A kv value and its optional deadline
#[derive(Debug, Clone)]
struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| deadline > now)
    }
}

#[derive(Debug, Default)]
struct State {
    kv: BTreeMap<String, Entry>,
    hashes: BTreeMap<String, BTreeMap<String, String>>,
    queues: BTreeMap<String, VecDeque<String>>,
}

impl State {
    fn live_entry(&mut self, key: &str) -> Option<&mut Entry> {
        let now = Instant::now();
        if self.kv.get(key).is_some_and(|e| !e.is_live(now)) {
            self.kv.remove(key);
        }
        self.kv.get_mut(key)
    }
}

/// An in-process store.
///
/// Each clone is a separate connection to the same data: state is shared,
/// authentication is per connection.
pub struct MemoryStore {
    shared: Arc<Mutex<State>>,
    password: Option<Arc<str>>,
    authenticated: bool,
}

impl MemoryStore {
    /// A store that accepts commands without authentication
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(State::default())),
            password: None,
            authenticated: true,
        }
    }

    /// A store that answers `noauth` until `auth <password>` succeeds
    pub fn with_password(password: &str) -> Self {
        Self {
            shared: Arc::new(Mutex::new(State::default())),
            password: Some(Arc::from(password)),
            authenticated: false,
        }
    }

    /// Open another connection to the same data
    pub fn connect(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            password: self.password.clone(),
            authenticated: self.password.is_none(),
        }
    }

    /// Number of live scalar keys
    pub fn key_count(&self) -> usize {
        let now = Instant::now();
        self.shared.lock().kv.values().filter(|e| e.is_live(now)).count()
    }

    /// Execute one command given as raw blocks (name first)
    pub fn dispatch(&mut self, name: &str, args: &[Bytes]) -> Vec<String> {
        let args = Args(args);
        let outcome = if name == "auth" {
            self.auth(&args)
        } else if !self.authenticated {
            Ok(vec!["noauth".to_string(), "authentication required".to_string()])
        } else {
            let mut state = self.shared.lock();
            execute(&mut state, name, &args)
        };
        outcome.unwrap_or_else(|reply| reply)
    }

    fn auth(&mut self, args: &Args<'_>) -> Outcome {
        args.exactly(1)?;
        match &self.password {
            None => ok(["1"]),
            Some(expected) if **expected == *args.text(0) => {
                self.authenticated = true;
                ok(["1"])
            }
            Some(_) => Ok(vec!["error".to_string(), "invalid password".to_string()]),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        self.connect()
    }
}

impl Transport for MemoryStore {
    fn execute(&mut self, command: &Command) -> io::Result<Vec<String>> {
        let args: Vec<Bytes> = command.args().iter().map(|a| a.as_bytes()).collect();
        Ok(self.dispatch(command.name(), &args))
    }
}

// =============================================================================
// Replies and Arguments
// =============================================================================

fn ok<I, S>(payload: I) -> Outcome
where
    I: IntoIterator<Item = S>,
    S: ToString,
{
    Ok(std::iter::once(STATUS_OK.to_string())
        .chain(payload.into_iter().map(|s| s.to_string()))
        .collect())
}

fn not_found() -> Outcome {
    Ok(vec![STATUS_NOT_FOUND.to_string()])
}

fn error(message: &str) -> Reply {
    vec!["error".to_string(), message.to_string()]
}

fn client_error(message: &str) -> Reply {
    vec!["client_error".to_string(), message.to_string()]
}

struct Args<'a>(&'a [Bytes]);

impl Args<'_> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn at_least(&self, n: usize) -> std::result::Result<(), Reply> {
        if self.len() < n {
            return Err(client_error("wrong number of arguments"));
        }
        Ok(())
    }

    fn exactly(&self, n: usize) -> std::result::Result<(), Reply> {
        if self.len() != n {
            return Err(client_error("wrong number of arguments"));
        }
        Ok(())
    }

    fn text(&self, i: usize) -> String {
        self.0
            .get(i)
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default()
    }

    fn bytes(&self, i: usize) -> Vec<u8> {
        self.0.get(i).map(|b| b.to_vec()).unwrap_or_default()
    }

    fn int(&self, i: usize) -> std::result::Result<i64, Reply> {
        self.text(i)
            .trim()
            .parse()
            .map_err(|_| client_error("expecting an integer argument"))
    }

    fn int_or(&self, i: usize, default: i64) -> std::result::Result<i64, Reply> {
        if i < self.len() {
            self.int(i)
        } else {
            Ok(default)
        }
    }

    fn window(&self, first: usize) -> std::result::Result<(String, String, usize), Reply> {
        let limit = self.int(first + 2)?.max(0);
        Ok((
            self.text(first),
            self.text(first + 1),
            usize::try_from(limit).unwrap_or(usize::MAX),
        ))
    }
}

// =============================================================================
// Command Execution
// =============================================================================

fn execute(state: &mut State, name: &str, args: &Args<'_>) -> Outcome {
    match name {
        // scalar
        "set" => {
            args.exactly(2)?;
            state.kv.insert(args.text(0), Entry::new(args.bytes(1)));
            ok(["1"])
        }
        "setx" => {
            args.exactly(3)?;
            let ttl = args.int(2)?;
            let mut entry = Entry::new(args.bytes(1));
            entry.expires_at = Some(deadline(ttl));
            state.kv.insert(args.text(0), entry);
            ok(["1"])
        }
        "setnx" => {
            args.exactly(2)?;
            let key = args.text(0);
            if state.live_entry(&key).is_some() {
                return ok(["0"]);
            }
            state.kv.insert(key, Entry::new(args.bytes(1)));
            ok(["1"])
        }
        "get" => {
            args.exactly(1)?;
            match state.live_entry(&args.text(0)) {
                Some(entry) => ok([lossy(&entry.value)]),
                None => not_found(),
            }
        }
        "getset" => {
            args.exactly(2)?;
            let key = args.text(0);
            let old = state.live_entry(&key).map(|e| lossy(&e.value));
            state.kv.insert(key, Entry::new(args.bytes(1)));
            match old {
                Some(old) => ok([old]),
                None => not_found(),
            }
        }
        "del" => {
            args.exactly(1)?;
            state.kv.remove(&args.text(0));
            ok(["1"])
        }
        "exists" => {
            args.exactly(1)?;
            ok([flag(state.live_entry(&args.text(0)).is_some())])
        }
        "expire" => {
            args.exactly(2)?;
            let ttl = args.int(1)?;
            match state.live_entry(&args.text(0)) {
                Some(entry) => {
                    entry.expires_at = Some(deadline(ttl));
                    ok(["1"])
                }
                None => ok(["0"]),
            }
        }
        "ttl" => {
            args.exactly(1)?;
            let remaining = state
                .live_entry(&args.text(0))
                .and_then(|e| e.expires_at)
                .map(|deadline| {
                    let left = deadline.saturating_duration_since(Instant::now());
                    // round up so a fresh `setx k v 10` reports 10
                    let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
                    i64::try_from(secs).unwrap_or(i64::MAX)
                })
                .unwrap_or(-1);
            ok([remaining])
        }
        "incr" => {
            args.at_least(1)?;
            let delta = args.int_or(1, 1)?;
            let key = args.text(0);
            let current = match state.live_entry(&key) {
                Some(entry) => parse_counter(&entry.value)?,
                None => 0,
            };
            let next = current
                .checked_add(delta)
                .ok_or_else(|| error("value is not an integer or out of range"))?;
            match state.live_entry(&key) {
                Some(entry) => entry.value = next.to_string().into_bytes(),
                None => {
                    state.kv.insert(key, Entry::new(next.to_string().into_bytes()));
                }
            }
            ok([next])
        }
        "strlen" => {
            args.exactly(1)?;
            let len = state.live_entry(&args.text(0)).map_or(0, |e| e.value.len());
            ok([len])
        }
        "substr" => {
            args.at_least(2)?;
            let start = args.int(1)?;
            let size = if args.len() > 2 { Some(args.int(2)?) } else { None };
            let value = state
                .live_entry(&args.text(0))
                .map(|e| e.value.clone())
                .unwrap_or_default();
            ok([lossy(substr(&value, start, size))])
        }
        "setbit" => {
            args.exactly(3)?;
            let offset = bit_offset(args.int(1)?)?;
            let on = args.int(2)? != 0;
            let key = args.text(0);
            if state.live_entry(&key).is_none() {
                state.kv.insert(key.clone(), Entry::new(Vec::new()));
            }
            let entry = state
                .live_entry(&key)
                .ok_or_else(|| error("key vanished"))?;
            let (byte, mask) = (offset / 8, 1u8 << (offset % 8));
            if entry.value.len() <= byte {
                entry.value.resize(byte + 1, 0);
            }
            let old = entry.value[byte] & mask != 0;
            if on {
                entry.value[byte] |= mask;
            } else {
                entry.value[byte] &= !mask;
            }
            ok([flag(old)])
        }
        "getbit" => {
            args.exactly(2)?;
            let offset = bit_offset(args.int(1)?)?;
            let bit = state
                .live_entry(&args.text(0))
                .and_then(|e| e.value.get(offset / 8).copied())
                .map_or(false, |b| b & (1u8 << (offset % 8)) != 0);
            ok([flag(bit)])
        }
        "multi_set" => {
            if args.len() < 2 || args.len() % 2 != 0 {
                return Err(client_error("wrong number of arguments"));
            }
            for i in (0..args.len()).step_by(2) {
                state.kv.insert(args.text(i), Entry::new(args.bytes(i + 1)));
            }
            ok([args.len() / 2])
        }
        "multi_get" => {
            args.at_least(1)?;
            let mut payload = Vec::new();
            for i in 0..args.len() {
                let key = args.text(i);
                if let Some(entry) = state.live_entry(&key) {
                    let value = lossy(&entry.value);
                    payload.push(key);
                    payload.push(value);
                }
            }
            ok(payload)
        }
        "multi_del" => {
            args.at_least(1)?;
            let removed = (0..args.len())
                .filter(|&i| state.kv.remove(&args.text(i)).is_some())
                .count();
            ok([removed])
        }
        "keys" | "rkeys" | "scan" | "rscan" => {
            args.exactly(3)?;
            let (start, end, limit) = args.window(0)?;
            let now = Instant::now();
            let reverse = name.starts_with('r');
            let with_values = name.ends_with("scan");
            let mut payload = Vec::new();
            for (key, entry) in window(&state.kv, &start, &end, reverse)
                .filter(|(_, e)| e.is_live(now))
                .take(limit)
            {
                payload.push(key.clone());
                if with_values {
                    payload.push(lossy(&entry.value));
                }
            }
            ok(payload)
        }

        // hashmap
        "hset" => {
            args.exactly(3)?;
            let fields = state.hashes.entry(args.text(0)).or_default();
            let added = fields.insert(args.text(1), args.text(2)).is_none();
            ok([flag(added)])
        }
        "hget" => {
            args.exactly(2)?;
            match state.hashes.get(&args.text(0)).and_then(|h| h.get(&args.text(1))) {
                Some(value) => ok([value]),
                None => not_found(),
            }
        }
        "hdel" => {
            args.exactly(2)?;
            let set = args.text(0);
            let removed = state
                .hashes
                .get_mut(&set)
                .and_then(|h| h.remove(&args.text(1)))
                .is_some();
            drop_if_empty(&mut state.hashes, &set);
            ok([flag(removed)])
        }
        "hexists" => {
            args.exactly(2)?;
            let found = state
                .hashes
                .get(&args.text(0))
                .is_some_and(|h| h.contains_key(&args.text(1)));
            ok([flag(found)])
        }
        "hclear" => {
            args.exactly(1)?;
            let removed = state.hashes.remove(&args.text(0)).map_or(0, |h| h.len());
            ok([removed])
        }
        "hsize" => {
            args.exactly(1)?;
            ok([state.hashes.get(&args.text(0)).map_or(0, |h| h.len())])
        }
        "hincr" => {
            args.at_least(2)?;
            let delta = args.int_or(2, 1)?;
            let fields = state.hashes.entry(args.text(0)).or_default();
            let field = fields.entry(args.text(1)).or_insert_with(|| "0".to_string());
            let next = parse_counter(field.as_bytes())?
                .checked_add(delta)
                .ok_or_else(|| error("value is not an integer or out of range"))?;
            *field = next.to_string();
            ok([next])
        }
        "hgetall" => {
            args.exactly(1)?;
            let payload: Vec<String> = state
                .hashes
                .get(&args.text(0))
                .map(|h| h.iter().flat_map(|(k, v)| [k.clone(), v.clone()]).collect())
                .unwrap_or_default();
            ok(payload)
        }
        "hscan" | "hrscan" | "hkeys" => {
            args.exactly(4)?;
            let (start, end, limit) = args.window(1)?;
            let mut payload = Vec::new();
            if let Some(fields) = state.hashes.get(&args.text(0)) {
                for (key, value) in window(fields, &start, &end, name == "hrscan").take(limit) {
                    payload.push(key.clone());
                    if name != "hkeys" {
                        payload.push(value.clone());
                    }
                }
            }
            ok(payload)
        }
        "hlist" | "hrlist" => {
            args.exactly(3)?;
            let (start, end, limit) = args.window(0)?;
            let names: Vec<String> = window(&state.hashes, &start, &end, name == "hrlist")
                .take(limit)
                .map(|(k, _)| k.clone())
                .collect();
            ok(names)
        }
        "multi_hset" => {
            if args.len() < 3 || args.len() % 2 == 0 {
                return Err(client_error("wrong number of arguments"));
            }
            let fields = state.hashes.entry(args.text(0)).or_default();
            for i in (1..args.len()).step_by(2) {
                fields.insert(args.text(i), args.text(i + 1));
            }
            ok([(args.len() - 1) / 2])
        }
        "multi_hget" => {
            args.at_least(2)?;
            let mut payload = Vec::new();
            if let Some(fields) = state.hashes.get(&args.text(0)) {
                for i in 1..args.len() {
                    let key = args.text(i);
                    if let Some(value) = fields.get(&key) {
                        payload.push(key);
                        payload.push(value.clone());
                    }
                }
            }
            ok(payload)
        }
        "multi_hdel" => {
            args.at_least(2)?;
            let set = args.text(0);
            let removed = match state.hashes.get_mut(&set) {
                Some(fields) => (1..args.len())
                    .filter(|&i| fields.remove(&args.text(i)).is_some())
                    .count(),
                None => 0,
            };
            drop_if_empty(&mut state.hashes, &set);
            ok([removed])
        }

        // queue
        "qsize" => {
            args.exactly(1)?;
            ok([state.queues.get(&args.text(0)).map_or(0, |q| q.len())])
        }
        "qclear" => {
            args.exactly(1)?;
            let removed = state.queues.remove(&args.text(0)).map_or(0, |q| q.len());
            ok([removed])
        }
        "qpush_front" | "qpush_back" | "qpush" => {
            args.at_least(2)?;
            let queue = state.queues.entry(args.text(0)).or_default();
            for i in 1..args.len() {
                if name == "qpush_front" {
                    queue.push_front(args.text(i));
                } else {
                    queue.push_back(args.text(i));
                }
            }
            ok([queue.len()])
        }
        "qpop_front" | "qpop_back" | "qpop" => {
            args.at_least(1)?;
            let size = usize::try_from(args.int_or(1, 1)?.max(1)).unwrap_or(usize::MAX);
            let set = args.text(0);
            let mut popped = Vec::new();
            if let Some(queue) = state.queues.get_mut(&set) {
                while popped.len() < size {
                    let item = if name == "qpop_back" {
                        queue.pop_back()
                    } else {
                        queue.pop_front()
                    };
                    match item {
                        Some(item) => popped.push(item),
                        None => break,
                    }
                }
            }
            drop_if_empty(&mut state.queues, &set);
            if popped.is_empty() {
                return not_found();
            }
            ok(popped)
        }
        "qslice" => {
            args.exactly(3)?;
            let (begin, end) = (args.int(1)?, args.int(2)?);
            let items: Vec<String> = match state.queues.get(&args.text(0)) {
                Some(queue) => slice_bounds(queue.len(), begin, end)
                    .map(|(b, e)| queue.range(b..=e).cloned().collect())
                    .unwrap_or_default(),
                None => Vec::new(),
            };
            ok(items)
        }
        "qrange" => {
            args.exactly(3)?;
            let (offset, limit) = (args.int(1)?, args.int(2)?);
            let items: Vec<String> = match state.queues.get(&args.text(0)) {
                Some(queue) if limit > 0 => {
                    let len = queue.len() as i64;
                    let start = if offset < 0 { (len + offset).max(0) } else { offset };
                    queue
                        .iter()
                        .skip(usize::try_from(start).unwrap_or(usize::MAX))
                        .take(usize::try_from(limit).unwrap_or(usize::MAX))
                        .cloned()
                        .collect()
                }
                _ => Vec::new(),
            };
            ok(items)
        }
        "qtrim_front" | "qtrim_back" => {
            args.exactly(2)?;
            let size = usize::try_from(args.int(1)?.max(0)).unwrap_or(usize::MAX);
            let set = args.text(0);
            let removed = match state.queues.get_mut(&set) {
                Some(queue) => {
                    let n = size.min(queue.len());
                    if name == "qtrim_front" {
                        queue.drain(..n);
                    } else {
                        queue.truncate(queue.len() - n);
                    }
                    n
                }
                None => 0,
            };
            drop_if_empty(&mut state.queues, &set);
            ok([removed])
        }
        "qlist" | "qrlist" => {
            args.exactly(3)?;
            let (start, end, limit) = args.window(0)?;
            let names: Vec<String> = window(&state.queues, &start, &end, name == "qrlist")
                .take(limit)
                .map(|(k, _)| k.clone())
                .collect();
            ok(names)
        }
        "qset" => {
            args.exactly(3)?;
            let index = args.int(1)?;
            let slot = state
                .queues
                .get_mut(&args.text(0))
                .and_then(|queue| {
                    let i = position(queue.len(), index)?;
                    queue.get_mut(i)
                })
                .ok_or_else(|| error("index out of range"))?;
            *slot = args.text(2);
            ok(["1"])
        }
        "qget" => {
            args.exactly(2)?;
            let index = args.int(1)?;
            let item = state
                .queues
                .get(&args.text(0))
                .and_then(|queue| queue.get(position(queue.len(), index)?));
            match item {
                Some(item) => ok([item]),
                None => not_found(),
            }
        }
        "qfront" | "qback" => {
            args.exactly(1)?;
            let item = state.queues.get(&args.text(0)).and_then(|q| {
                if name == "qfront" {
                    q.front()
                } else {
                    q.back()
                }
            });
            match item {
                Some(item) => ok([item]),
                None => not_found(),
            }
        }

        _ => Err(client_error(&format!("Unknown Command: {}", name))),
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn deadline(ttl: i64) -> Instant {
    Instant::now() + Duration::from_secs(u64::try_from(ttl).unwrap_or(0))
}

fn parse_counter(value: &[u8]) -> std::result::Result<i64, Reply> {
    std::str::from_utf8(value)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| error("value is not an integer or out of range"))
}

fn bit_offset(offset: i64) -> std::result::Result<usize, Reply> {
    usize::try_from(offset).map_err(|_| client_error("offset is out of range"))
}

fn drop_if_empty<V: IsEmpty>(map: &mut BTreeMap<String, V>, name: &str) {
    if map.get(name).is_some_and(IsEmpty::is_empty) {
        map.remove(name);
    }
}

trait IsEmpty {
    fn is_empty(&self) -> bool;
}

impl IsEmpty for BTreeMap<String, String> {
    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }
}

impl IsEmpty for VecDeque<String> {
    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }
}

/// Walk `(start, end]` forwards, or downwards from `start` to `end` when
/// `reverse`. Empty bounds are open.
fn window<'a, V>(
    map: &'a BTreeMap<String, V>,
    start: &str,
    end: &str,
    reverse: bool,
) -> Box<dyn Iterator<Item = (&'a String, &'a V)> + 'a> {
    let (low, high) = if reverse { (end, start) } else { (start, end) };
    if !low.is_empty() && !high.is_empty() && low > high {
        return Box::new(std::iter::empty());
    }

    let open = |bound: &str, edge: Bound<String>| {
        if bound.is_empty() {
            Bound::Unbounded
        } else {
            edge
        }
    };

    if reverse {
        let lower = open(low, Bound::Included(low.to_string()));
        let upper = open(high, Bound::Excluded(high.to_string()));
        Box::new(map.range::<String, _>((lower, upper)).rev())
    } else {
        let lower = open(low, Bound::Excluded(low.to_string()));
        let upper = open(high, Bound::Included(high.to_string()));
        Box::new(map.range::<String, _>((lower, upper)))
    }
}

/// Normalize a possibly negative index against `len`
fn position(len: usize, index: i64) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let index = if index < 0 { len + index } else { index };
    (0..len).contains(&index).then(|| index as usize)
}

/// Inclusive `[begin, end]` bounds for `qslice`, clamped to the queue
fn slice_bounds(len: usize, begin: i64, end: i64) -> Option<(usize, usize)> {
    let len = i64::try_from(len).ok()?;
    if len == 0 {
        return None;
    }
    let begin = if begin < 0 { (len + begin).max(0) } else { begin };
    let end = if end < 0 { len + end } else { end.min(len - 1) };
    if begin > end {
        return None;
    }
    Some((begin as usize, end as usize))
}

fn substr(value: &[u8], start: i64, size: Option<i64>) -> &[u8] {
    let len = value.len() as i64;
    let start = if start < 0 { (len + start).max(0) } else { start.min(len) };
    let end = match size {
        None => len,
        Some(size) if size < 0 => len + size,
        Some(size) => start.saturating_add(size).min(len),
    };
    if end <= start {
        return &[];
    }
    &value[start as usize..end as usize]
}
