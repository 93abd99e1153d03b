//! OS process liveness checks.

/// Returns the identifier of the current process.
pub fn current_pid() -> u32 {
  std::process::id()
}

/// Returns whether a process with the given ID currently exists.
///
/// A process that exists but belongs to another user still counts as alive.
#[cfg(unix)]
pub fn process_exists(pid: u32) -> bool {
  use rustix::io::Errno;
  use rustix::process::{Pid, test_kill_process};

  let Ok(raw) = i32::try_from(pid) else {
    return false;
  };
  let Some(pid) = Pid::from_raw(raw) else {
    return false;
  };

  match test_kill_process(pid) {
    Ok(()) => true,
    Err(Errno::PERM) => true,
    Err(_) => false,
  }
}

/// Returns whether a process with the given ID currently exists.
///
/// A process that exists but cannot be opened for querying still counts as alive.
#[cfg(windows)]
pub fn process_exists(pid: u32) -> bool {
  use windows_sys::Win32::Foundation::{CloseHandle, ERROR_ACCESS_DENIED, GetLastError, STILL_ACTIVE};
  use windows_sys::Win32::System::Threading::{GetExitCodeProcess, OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION};

  // SAFETY: OpenProcess has no preconditions; the returned handle is checked for
  // null and closed exactly once before returning.
  unsafe {
    let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
    if handle.is_null() {
      return GetLastError() == ERROR_ACCESS_DENIED;
    }

    let mut exit_code: u32 = 0;
    let queried = GetExitCodeProcess(handle, &mut exit_code);
    CloseHandle(handle);

    queried != 0 && exit_code == STILL_ACTIVE as u32
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn current_process_exists() {
    assert!(process_exists(current_pid()));
  }

  #[cfg(unix)]
  #[test]
  fn pid_zero_is_not_a_process() {
    assert!(!process_exists(0));
  }

  #[test]
  fn exited_child_does_not_exist() {
    let mut child = std::process::Command::new(if cfg!(windows) { "cmd.exe" } else { "/bin/sh" })
      .args(if cfg!(windows) { ["/C", "exit 0"] } else { ["-c", "exit 0"] })
      .spawn()
      .unwrap();
    let pid = child.id();
    child.wait().unwrap();

    assert!(!process_exists(pid));
  }
}
