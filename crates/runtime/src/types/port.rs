//! Ports
//!
//! Textual I/O endpoints over two media: a file descriptor or an
//! in-memory string buffer. Mode and state live in a flag word; a
//! one-slot pushback queue makes `peek-char` a read followed by an
//! unread. Reads on an exhausted or closed input port yield the eof
//! sentinel; writes on a closed or non-output port are file errors.

use std::collections::VecDeque;
use std::ffi::CString;

use sable_core::{Metatype, Value, is_instance, object_allocate, object_data_as};

use crate::error::{Error, Result, check_type};
use crate::types::character::mk_char;
use crate::types::eof::mk_eof_object;
use crate::types::string::mk_string;

pub const PORT_FILE: u32 = 0x01;
pub const PORT_STRING: u32 = 0x02;
pub const PORT_INPUT: u32 = 0x04;
pub const PORT_OUTPUT: u32 = 0x08;
pub const PORT_TEXTUAL: u32 = 0x10;
pub const PORT_BINARY: u32 = 0x20;
pub const PORT_OPEN: u32 = 0x40;
/// Standard-stream ports: closing detaches without closing the fd.
pub const PORT_NOCLOSE: u32 = 0x80;

pub struct PortObj {
    pub flags: u32,
    pub fd: i32,
    /// Filename for file ports.
    pub name: String,
    /// Buffer for string ports; input consumes from `pos`, output appends.
    pub buffer: String,
    pub pos: usize,
    pub pushback: VecDeque<u32>,
}

impl PortObj {
    fn close(&mut self) -> bool {
        if self.flags & PORT_OPEN == 0 {
            return false;
        }

        if self.flags & PORT_NOCLOSE != 0 {
            self.flags &= !PORT_OPEN;
            self.fd = -1;
            return true;
        }

        if self.fd != -1 {
            unsafe { libc::close(self.fd) };
            self.fd = -1;
        }

        self.buffer.clear();
        self.flags &= !PORT_OPEN;
        true
    }
}

unsafe fn port_destruct(v: Value) {
    unsafe {
        let port = object_data_as::<PortObj>(v);
        (*port).close();
        std::ptr::drop_in_place(port);
    }
}

fn port_repr(v: Value) -> String {
    let port = unsafe { &*object_data_as::<PortObj>(v) };
    let mut out = String::from("<#port");

    if port.flags & PORT_FILE != 0 {
        out.push_str(&format!(" {} fd {} ", port.name, port.fd));
    }
    if port.flags & PORT_STRING != 0 {
        out.push_str(" stringbuf ");
    }
    if port.flags & PORT_OPEN != 0 {
        out.push_str("open ");
    }
    if port.flags & PORT_NOCLOSE != 0 {
        out.push_str("noclose ");
    }
    if port.flags & PORT_INPUT != 0 {
        out.push('r');
    }
    if port.flags & PORT_OUTPUT != 0 {
        out.push('w');
    }
    if port.flags & PORT_BINARY != 0 {
        out.push('b');
    }

    out.push('>');
    out
}

pub static PORT_METATYPE: Metatype = Metatype {
    name: "port",
    flags: 0,
    destruct: Some(port_destruct),
    gc_visit: None,
    repr: Some(port_repr),
};

fn alloc_port(flags: u32, fd: i32, name: String, buffer: String) -> Value {
    object_allocate(
        &PORT_METATYPE,
        PortObj {
            flags,
            fd,
            name,
            buffer,
            pos: 0,
            pushback: VecDeque::new(),
        },
    )
}

unsafe fn port_data(v: Value) -> *mut PortObj {
    unsafe { object_data_as::<PortObj>(v) }
}

// =============================================================================
// Predicates
// =============================================================================

pub fn is_port(v: Value) -> bool {
    is_instance(v, &PORT_METATYPE)
}

fn port_has_flag(v: Value, flag: u32) -> bool {
    is_port(v) && unsafe { (*port_data(v)).flags } & flag != 0
}

pub fn is_input_port(v: Value) -> bool {
    port_has_flag(v, PORT_INPUT)
}

pub fn is_output_port(v: Value) -> bool {
    port_has_flag(v, PORT_OUTPUT)
}

pub fn is_textual_port(v: Value) -> bool {
    is_port(v) && unsafe { (*port_data(v)).flags } & PORT_BINARY == 0
}

pub fn is_binary_port(v: Value) -> bool {
    port_has_flag(v, PORT_BINARY)
}

pub fn is_string_port(v: Value) -> bool {
    port_has_flag(v, PORT_STRING)
}

pub fn is_file_port(v: Value) -> bool {
    port_has_flag(v, PORT_FILE)
}

pub fn is_input_port_open(v: Value) -> Result<bool> {
    check_type(is_input_port, v, "input-port-open?: expected input port")?;
    Ok(unsafe { (*port_data(v)).flags } & PORT_OPEN != 0)
}

pub fn is_output_port_open(v: Value) -> Result<bool> {
    check_type(is_output_port, v, "output-port-open?: expected output port")?;
    Ok(unsafe { (*port_data(v)).flags } & PORT_OPEN != 0)
}

// =============================================================================
// Constructors
// =============================================================================

fn oflag_bits(oflag: i32) -> u32 {
    let mut flags = 0;
    match oflag & libc::O_ACCMODE {
        libc::O_RDONLY => flags |= PORT_INPUT,
        libc::O_WRONLY => flags |= PORT_OUTPUT,
        libc::O_RDWR => flags |= PORT_INPUT | PORT_OUTPUT,
        _ => {}
    }
    flags
}

/// Wrap an already-open descriptor without taking ownership of it.
pub fn mk_port_from_fd(fd: i32, oflag: i32) -> Value {
    alloc_port(
        PORT_FILE | PORT_OPEN | PORT_TEXTUAL | PORT_BINARY | PORT_NOCLOSE | oflag_bits(oflag),
        fd,
        String::new(),
        String::new(),
    )
}

fn open_file(filename: &str, oflag: i32) -> Result<Value> {
    let path = CString::new(filename)
        .map_err(|_| Error::file_error("open: filename contains NUL", mk_string(filename)))?;

    let fd = loop {
        let fd = unsafe { libc::open(path.as_ptr(), oflag | libc::O_CLOEXEC, 0o644) };
        if fd != -1 {
            break fd;
        }
        let err = std::io::Error::last_os_error();
        if err.raw_os_error() != Some(libc::EINTR) {
            return Err(Error::file_error(err.to_string(), mk_string(filename)));
        }
    };

    Ok(alloc_port(
        PORT_FILE | PORT_OPEN | PORT_TEXTUAL | PORT_BINARY | oflag_bits(oflag),
        fd,
        filename.to_string(),
        String::new(),
    ))
}

pub fn open_input_file(filename: &str) -> Result<Value> {
    open_file(filename, libc::O_RDONLY)
}

pub fn open_output_file(filename: &str) -> Result<Value> {
    open_file(filename, libc::O_CREAT | libc::O_WRONLY | libc::O_TRUNC)
}

pub fn open_input_string(contents: String) -> Value {
    alloc_port(
        PORT_STRING | PORT_TEXTUAL | PORT_INPUT | PORT_OPEN,
        -1,
        String::new(),
        contents,
    )
}

pub fn open_output_string() -> Value {
    alloc_port(
        PORT_STRING | PORT_TEXTUAL | PORT_OUTPUT | PORT_OPEN,
        -1,
        String::new(),
        String::new(),
    )
}

pub fn get_output_string(v: Value) -> Result<String> {
    check_type(is_output_port, v, "get-output-string: expected output port")?;
    let port = unsafe { &*port_data(v) };
    if port.flags & PORT_STRING == 0 {
        return Err(Error::type_error("get-output-string: expected string port", v));
    }
    Ok(port.buffer.clone())
}

pub fn close_port(v: Value) -> Result<bool> {
    check_type(is_port, v, "close-port: expected port")?;
    Ok(unsafe { (*port_data(v)).close() })
}

// =============================================================================
// Input
// =============================================================================

/// One character, or the eof sentinel on exhaustion or a closed port.
pub fn read_char(port: Value) -> Result<Value> {
    check_type(is_input_port, port, "read-char: expected input port")?;
    if !is_input_port_open(port)? {
        return Ok(mk_eof_object());
    }

    let data = unsafe { &mut *port_data(port) };

    if let Some(c) = data.pushback.pop_front() {
        return Ok(mk_char(c));
    }

    if data.flags & PORT_STRING != 0 {
        match data.buffer.as_bytes().get(data.pos) {
            Some(&b) => {
                data.pos += 1;
                return Ok(mk_char(u32::from(b)));
            }
            None => return Ok(mk_eof_object()),
        }
    }

    if data.flags & PORT_FILE != 0 {
        let mut byte = 0u8;
        loop {
            let n = unsafe { libc::read(data.fd, (&mut byte as *mut u8).cast(), 1) };
            match n {
                0 => return Ok(mk_eof_object()),
                1 => return Ok(mk_char(u32::from(byte))),
                _ => {
                    let err = std::io::Error::last_os_error();
                    if err.raw_os_error() != Some(libc::EINTR) {
                        return Err(Error::file_error(format!("read-char: {err}"), port));
                    }
                }
            }
        }
    }

    Err(Error::file_error("read-char: unknown port medium", port))
}

pub fn peek_char(port: Value) -> Result<Value> {
    check_type(is_input_port, port, "peek-char: expected input port")?;
    if !is_input_port_open(port)? {
        return Ok(mk_eof_object());
    }

    let val = read_char(port)?;
    if crate::types::eof::is_eof_object(val) {
        return Ok(val);
    }

    let c = crate::types::character::char_get(val)?;
    unsafe { (*port_data(port)).pushback.push_back(c) };
    Ok(val)
}

/// Characters up to (not including) the next newline, or eof when the
/// port is already exhausted.
pub fn read_line(port: Value) -> Result<Value> {
    check_type(is_input_port, port, "read-line: expected input port")?;

    let mut line = String::new();
    loop {
        let val = read_char(port)?;
        if crate::types::eof::is_eof_object(val) {
            if line.is_empty() {
                return Ok(val);
            }
            return Ok(mk_string(line));
        }

        let c = crate::types::character::char_get(val)?;
        if c == u32::from(b'\n') {
            return Ok(mk_string(line));
        }
        line.push(char::from_u32(c).unwrap_or('\u{fffd}'));
    }
}

/// Would a `read-char` return without blocking?
pub fn is_char_ready(port: Value) -> Result<bool> {
    check_type(is_input_port, port, "char-ready?: expected input port")?;
    let data = unsafe { &*port_data(port) };

    if !data.pushback.is_empty() {
        return Ok(true);
    }
    if data.flags & PORT_STRING != 0 {
        return Ok(data.pos < data.buffer.len());
    }
    if data.flags & PORT_FILE != 0 {
        let mut pfd = libc::pollfd {
            fd: data.fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let n = unsafe { libc::poll(&mut pfd, 1, 0) };
        return Ok(n == 1 && pfd.revents & libc::POLLIN != 0);
    }
    Ok(false)
}

// =============================================================================
// Output
// =============================================================================

/// Write the whole string to an open output port.
pub fn write_string(port: Value, text: &str) -> Result<()> {
    check_type(is_output_port, port, "write: expected output port")?;
    if !is_output_port_open(port)? {
        return Err(Error::file_error("write: port is closed", port));
    }

    let data = unsafe { &mut *port_data(port) };

    if data.flags & PORT_STRING != 0 {
        data.buffer.push_str(text);
        return Ok(());
    }

    let bytes = text.as_bytes();
    let mut written = 0;
    while written < bytes.len() {
        let n = unsafe {
            libc::write(
                data.fd,
                bytes[written..].as_ptr().cast(),
                bytes.len() - written,
            )
        };
        if n < 0 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EINTR) {
                continue;
            }
            return Err(Error::file_error(format!("write: {err}"), port));
        }
        written += n as usize;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::character::char_get;
    use crate::types::eof::is_eof_object;
    use crate::types::string::string_get;

    #[test]
    fn test_string_port_reads_then_eof() {
        let p = open_input_string("ab".to_string());
        assert!(is_input_port(p));
        assert!(is_string_port(p));
        assert_eq!(char_get(read_char(p).unwrap()).unwrap(), u32::from(b'a'));
        assert_eq!(char_get(read_char(p).unwrap()).unwrap(), u32::from(b'b'));
        assert!(is_eof_object(read_char(p).unwrap()));
        assert!(is_eof_object(read_char(p).unwrap()));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let p = open_input_string("x".to_string());
        assert_eq!(char_get(peek_char(p).unwrap()).unwrap(), u32::from(b'x'));
        assert_eq!(char_get(peek_char(p).unwrap()).unwrap(), u32::from(b'x'));
        assert_eq!(char_get(read_char(p).unwrap()).unwrap(), u32::from(b'x'));
        assert!(is_eof_object(read_char(p).unwrap()));
    }

    #[test]
    fn test_read_line_strips_newline() {
        let p = open_input_string("one\ntwo".to_string());
        assert_eq!(string_get(read_line(p).unwrap()).unwrap(), "one");
        assert_eq!(string_get(read_line(p).unwrap()).unwrap(), "two");
        assert!(is_eof_object(read_line(p).unwrap()));
    }

    #[test]
    fn test_output_string_port_accumulates() {
        let p = open_output_string();
        write_string(p, "hello ").unwrap();
        write_string(p, "world").unwrap();
        assert_eq!(get_output_string(p).unwrap(), "hello world");
    }

    #[test]
    fn test_closed_port_reads_eof_and_rejects_writes() {
        let input = open_input_string("abc".to_string());
        close_port(input).unwrap();
        assert!(is_eof_object(read_char(input).unwrap()));

        let output = open_output_string();
        close_port(output).unwrap();
        assert!(write_string(output, "x").is_err());
    }

    #[test]
    fn test_char_ready_on_string_port() {
        let p = open_input_string("a".to_string());
        assert!(is_char_ready(p).unwrap());
        read_char(p).unwrap();
        assert!(!is_char_ready(p).unwrap());
    }
}
