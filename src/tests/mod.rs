// Test modules
