// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! The control channel over librados.

use std::ffi::CString;
use std::ptr;

use ceph_rust::rados as ceph;
use libc::{c_char, c_int, size_t};
use log::debug;
use nix::errno::Errno;

use crate::config::Config;
use crate::error::ConnectionError;
use crate::transport::{ClusterHandle, Connector, PoolContext};

fn failure(action: &str, ret: c_int) -> ConnectionError {
    ConnectionError::new(action, Errno::from_raw(ret.saturating_abs()).desc())
}

fn c_string(action: &str, s: &str) -> Result<CString, ConnectionError> {
    CString::new(s)
        .map_err(|_| ConnectionError::new(action, format!("'{s}' contains a NUL byte")))
}

/// Connects as `client.<client>` using the cluster configuration file.
#[derive(Debug, Clone)]
pub struct RadosConnector {
    ceph_conf: String,
    client: String,
}

impl RadosConnector {
    pub fn new(config: &Config) -> Self {
        RadosConnector {
            ceph_conf: config.ceph_conf.clone(),
            client: config.client.clone(),
        }
    }
}

impl Connector for RadosConnector {
    fn connect(&self) -> Result<Box<dyn ClusterHandle>, ConnectionError> {
        let action = "connect to cluster";
        let id = c_string(action, &self.client)?;
        let conf = c_string(action, &self.ceph_conf)?;

        let mut cluster: ceph::rados_t = ptr::null_mut();
        // SAFETY: `cluster` is a valid out pointer and `id` outlives the call.
        let ret = unsafe { ceph::rados_create(&mut cluster, id.as_ptr()) };
        if ret < 0 {
            return Err(failure(action, ret));
        }
        // From here on the handle owns `cluster` and shuts it down on drop.
        let handle = RadosHandle { cluster };

        // SAFETY: `cluster` was created above and `conf` outlives the call.
        let ret = unsafe { ceph::rados_conf_read_file(handle.cluster, conf.as_ptr()) };
        if ret < 0 {
            return Err(failure(&format!("read '{}'", self.ceph_conf), ret));
        }
        // SAFETY: `cluster` is configured and not yet connected.
        let ret = unsafe { ceph::rados_connect(handle.cluster) };
        if ret < 0 {
            return Err(failure(action, ret));
        }

        debug!("connected as client.{} using {}", self.client, self.ceph_conf);
        Ok(Box::new(handle))
    }
}

struct RadosHandle {
    cluster: ceph::rados_t,
}

/// Take ownership of a buffer librados allocated.
///
/// # Safety
///
/// `buf` must be null or a buffer of at least `len` bytes returned by librados.
unsafe fn take_buffer(buf: *mut c_char, len: size_t) -> Vec<u8> {
    if buf.is_null() {
        return Vec::new();
    }
    let bytes = std::slice::from_raw_parts(buf as *const u8, len).to_vec();
    ceph::rados_buffer_free(buf);
    bytes
}

impl ClusterHandle for RadosHandle {
    fn mon_command(
        &mut self,
        cmd: &str,
        inbuf: &[u8],
    ) -> Result<(i32, Vec<u8>, String), ConnectionError> {
        let action = "submit monitor command";
        if self.cluster.is_null() {
            return Err(ConnectionError::new(action, "the connection is shut down"));
        }
        let cmd = c_string(action, cmd)?;
        let mut cmds = [cmd.as_ptr()];

        let mut outbuf: *mut c_char = ptr::null_mut();
        let mut outbuflen: size_t = 0;
        let mut outs: *mut c_char = ptr::null_mut();
        let mut outslen: size_t = 0;

        // SAFETY: all pointers are valid for the duration of the call and the command array
        // holds one NUL terminated string.
        let status = unsafe {
            ceph::rados_mon_command(
                self.cluster,
                cmds.as_mut_ptr(),
                1,
                inbuf.as_ptr() as *const c_char,
                inbuf.len(),
                &mut outbuf,
                &mut outbuflen,
                &mut outs,
                &mut outslen,
            )
        };

        // SAFETY: librados returned these buffers with these lengths, or left them null.
        let (output, message) =
            unsafe { (take_buffer(outbuf, outbuflen), take_buffer(outs, outslen)) };
        Ok((status, output, String::from_utf8_lossy(&message).into_owned()))
    }

    fn open_pool(&mut self, name: &str) -> Result<Box<dyn PoolContext>, ConnectionError> {
        let action = format!("open pool '{name}'");
        if self.cluster.is_null() {
            return Err(ConnectionError::new(action, "the connection is shut down"));
        }
        let pool = c_string(&action, name)?;

        let mut ioctx: ceph::rados_ioctx_t = ptr::null_mut();
        // SAFETY: `cluster` is connected, `pool` outlives the call and `ioctx` is a valid out
        // pointer.
        let ret = unsafe { ceph::rados_ioctx_create(self.cluster, pool.as_ptr(), &mut ioctx) };
        if ret < 0 {
            return Err(failure(&action, ret));
        }
        Ok(Box::new(RadosPool {
            name: name.to_string(),
            ioctx,
        }))
    }

    fn shutdown(&mut self) {
        if !self.cluster.is_null() {
            // SAFETY: `cluster` was created by rados_create and is shut down only once.
            unsafe { ceph::rados_shutdown(self.cluster) };
            self.cluster = ptr::null_mut();
        }
    }
}

impl Drop for RadosHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct RadosPool {
    name: String,
    ioctx: ceph::rados_ioctx_t,
}

impl PoolContext for RadosPool {
    fn name(&self) -> &str {
        &self.name
    }

    fn close(&mut self) {
        if !self.ioctx.is_null() {
            // SAFETY: `ioctx` was created by rados_ioctx_create and is destroyed only once.
            unsafe { ceph::rados_ioctx_destroy(self.ioctx) };
            self.ioctx = ptr::null_mut();
        }
    }
}

impl Drop for RadosPool {
    fn drop(&mut self) {
        self.close();
    }
}
