/// Vela Shade Engine - Singleton manager for engine subsystems
///
/// This module provides global singleton management for the stage executor
/// and the logging system. It uses thread-safe static storage with RwLock
/// for safe concurrent access.

use std::sync::{OnceLock, RwLock, Arc, Mutex};
use std::time::SystemTime;
use crate::executor::StageExecutor;
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Executor singleton (wrapped in Mutex for thread-safe mutable access)
    executor: RwLock<Option<Arc<Mutex<dyn StageExecutor>>>>,
}

impl EngineState {
    /// Create a new empty engine state
    fn new() -> Self {
        Self {
            executor: RwLock::new(None),
        }
    }
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// Manages the lifecycle of the stage executor singleton and the global
/// logger, using a singleton pattern with thread-safe access.
///
/// # Example
///
/// ```no_run
/// use vela_shade::vela::Engine;
/// use vela_shade_executor_cpu::{CpuExecutor, CpuExecutorConfig};
///
/// // Initialize engine
/// Engine::initialize()?;
///
/// // Create executor singleton
/// Engine::create_executor(CpuExecutor::new(CpuExecutorConfig::default()))?;
///
/// // Access executor globally
/// let executor = Engine::executor()?;
///
/// // Cleanup
/// Engine::shutdown();
/// # Ok::<(), vela_shade::vela::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Helper to log errors before returning them (internal use)
    fn log_and_return_error(error: Error) -> Error {
        match &error {
            Error::InitializationFailed(msg) => {
                crate::vela_error!("vela::Engine", "Initialization failed: {}", msg);
            }
            Error::BackendError(msg) => {
                crate::vela_error!("vela::Engine", "Backend error: {}", msg);
            }
            _ => {
                crate::vela_error!("vela::Engine", "Engine error: {}", error);
            }
        }
        error
    }

    /// Initialize the engine
    ///
    /// This must be called once at application startup before creating any
    /// subsystems.
    ///
    /// # Errors
    ///
    /// Currently always succeeds, but returns Result for future extensibility.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Shutdown the entire engine and destroy all singletons
    ///
    /// This should be called at application shutdown. After calling this,
    /// `initialize()` must be called again before creating new subsystems.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut executor) = state.executor.write() {
                *executor = None;
            }
        }
    }

    /// Create and register the executor singleton
    ///
    /// This is a simplified API that automatically wraps the executor in Arc
    /// and registers it as a global singleton.
    ///
    /// # Arguments
    ///
    /// * `executor` - Any type implementing the StageExecutor trait
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - An executor already exists
    /// - The executor lock is poisoned
    pub fn create_executor<E: StageExecutor + 'static>(executor: E) -> Result<()> {
        let arc_executor: Arc<Mutex<dyn StageExecutor>> = Arc::new(Mutex::new(executor));

        Self::register_executor(arc_executor)?;

        crate::vela_info!("vela::Engine", "Executor singleton created successfully");

        Ok(())
    }

    /// Register an executor singleton (internal use)
    pub(crate) fn register_executor(executor: Arc<Mutex<dyn StageExecutor>>) -> Result<()> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))?;

        let mut lock = state.executor.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Executor lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("Executor already exists. Call Engine::destroy_executor() first.".to_string())
            ));
        }

        *lock = Some(executor);
        Ok(())
    }

    /// Get the executor singleton
    ///
    /// This provides global access to the executor after it has been created.
    ///
    /// # Returns
    ///
    /// A shared pointer to the executor wrapped in a Mutex for thread-safe
    /// access
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - The executor has not been created
    pub fn executor() -> Result<Arc<Mutex<dyn StageExecutor>>> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))?;

        let lock = state.executor.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Executor lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Executor not created. Call Engine::create_executor() first.".to_string())
            ))
    }

    /// Destroy the executor singleton
    ///
    /// Removes the executor singleton, allowing a new one to be created.
    /// All existing executor references will remain valid until dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized
    pub fn destroy_executor() -> Result<()> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized".to_string())
            ))?;

        let mut lock = state.executor.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Executor lock poisoned".to_string())
            ))?;

        *lock = None;

        crate::vela_info!("vela::Engine", "Executor singleton destroyed");

        Ok(())
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut executor) = state.executor.write() {
                *executor = None;
            }
        }
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger,
    /// test capture logger, etc.)
    ///
    /// # Arguments
    ///
    /// * `logger` - Any type implementing the Logger trait
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like vela_info!, vela_warn!, etc.
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Source module (e.g., "vela::Engine")
    /// * `message` - Log message
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by the vela_error! macro to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
